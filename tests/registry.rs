use mime_registry::{FilterDescriptor, Localizer, Registry, Table, extension_of};

fn filters(list: &[&str]) -> Vec<FilterDescriptor> {
    list.iter().map(|it| FilterDescriptor::untitled(*it)).collect()
}

#[test]
fn extension_of_file_names() {
    assert_eq!(extension_of("archive.tar.gz"), "gz");
    assert_eq!(extension_of("noext"), "");
    assert_eq!(extension_of(""), "");
}

#[test]
fn mime_type_of_is_case_insensitive() {
    let registry = Registry::new();
    assert_eq!(registry.mime_type_of("photo.JPG"), "image/jpeg");
    assert_eq!(registry.mime_type_of("clip.MkV"), "video/x-matroska");
    assert_eq!(registry.mime_type_of("unknown.xyz"), "");
}

#[test]
fn extension_filters_keep_first_seen_order() {
    let registry = Registry::new();
    assert_eq!(
        registry.extension_filter_to_mime_types(&filters(&["jpg,png"]), false),
        vec!["image/jpeg", "image/png"]
    );
    assert_eq!(
        registry.extension_filter_to_mime_types(&filters(&["JPG, jpeg ,png", "jpe,txt"]), false),
        vec!["image/jpeg", "image/png", "text/plain"]
    );
}

#[test]
fn wildcard_extension_accepts_everything() {
    let registry = Registry::new();
    assert!(registry.extension_filter_to_mime_types(&filters(&["*"]), false).is_empty());
    assert!(
        registry
            .extension_filter_to_mime_types(&filters(&["jpg", "png,*"]), true)
            .is_empty()
    );
}

#[test]
fn empty_extension_list_accepts_everything() {
    let registry = Registry::new();
    assert!(registry.extension_filter_to_mime_types(&filters(&[""]), false).is_empty());
    assert!(registry.extension_filter_to_mime_types(&filters(&[""]), true).is_empty());
    assert!(
        registry
            .extension_filter_to_mime_types(&filters(&["jpg", ""]), true)
            .is_empty()
    );
}

#[test]
fn no_filters_accumulate_nothing() {
    let registry = Registry::new();
    assert!(registry.extension_filter_to_mime_types(&[], false).is_empty());
    assert!(registry.extension_filter_to_mime_types(&[], true).is_empty());
}

#[test]
fn unknown_extension() {
    let registry = Registry::new();
    assert_eq!(
        registry.extension_filter_to_mime_types(&filters(&["unknownext"]), true),
        vec![".unknownext"]
    );
    assert!(
        registry
            .extension_filter_to_mime_types(&filters(&["unknownext"]), false)
            .is_empty()
    );
    assert!(
        registry
            .extension_filter_to_mime_types(&filters(&["jpg,unknownext"]), false)
            .is_empty()
    );
}

#[test]
fn image_wildcard_lists_all_image_extensions() {
    let registry = Registry::new();
    assert_eq!(
        registry.mime_types_to_extensions(&["image/*"]),
        vec![
            "bmp", "gif", "jpg", "jpeg", "jpe", "psd", "png", "svg", "svgz", "tiff", "tif"
        ]
    );
}

#[test]
fn subtype_wildcard_keeps_duplicates() {
    let registry = Registry::empty();
    registry.load("image/a,x y,image/b,y z,text/plain,txt");
    assert_eq!(
        registry.mime_types_to_extensions(&["image/*"]),
        vec!["x", "y", "y", "z"]
    );
    assert_eq!(
        registry.mime_types_to_extensions(&["image/b", "image/b"]),
        vec!["y", "z", "y", "z"]
    );
}

#[test]
fn bare_wildcard_clears_and_halts() {
    let registry = Registry::new();
    assert!(registry.mime_types_to_extensions(&["*", "image/png"]).is_empty());
    assert!(registry.mime_types_to_extensions(&["image/png", "*"]).is_empty());
    assert!(
        registry
            .mime_types_to_extensions(&["image/png", "*", "image/gif"])
            .is_empty()
    );
}

#[test]
fn unregistered_types_contribute_nothing() {
    let registry = Registry::new();
    assert_eq!(
        registry.mime_types_to_extensions(&["image/webp", "garbage", "image/png"]),
        vec!["png"]
    );
}

#[test]
fn filter_descriptor_from_joined_types() {
    let registry = Registry::new();
    assert_eq!(
        registry.mime_types_to_filter_descriptor("image/png, image/jpeg"),
        vec![FilterDescriptor::new("Files", "png,jpg,jpeg,jpe")]
    );
    assert_eq!(
        registry.mime_types_to_filter_descriptor(&["image/png", "image/jpeg"]),
        vec![FilterDescriptor::new("Files", "png,jpg,jpeg,jpe")]
    );
}

#[test]
fn filter_descriptor_falls_back_to_wildcard() {
    let registry = Registry::new();
    let descriptors = registry.mime_types_to_filter_descriptor("image/webp");
    assert_eq!(descriptors, vec![FilterDescriptor::new("Files", "*")]);
    assert!(descriptors[0].accepts_all());
    assert!(registry.mime_types_to_filter_descriptor("  ")[0].accepts_all());
    assert!(registry.mime_types_to_filter_descriptor("image/png,*")[0].accepts_all());
}

struct German;

impl Localizer for German {
    fn translate(&self, key: &str) -> String {
        match key {
            "Files" => "Dateien".to_string(),
            _ => key.to_string(),
        }
    }
}

#[test]
fn filter_descriptor_title_is_localized() {
    let registry = Registry::new();
    let descriptors = registry.mime_types_to_filter_descriptor_with("text/csv", &German);
    assert_eq!(descriptors, vec![FilterDescriptor::new("Dateien", "csv")]);
}

#[test]
fn loads_upsert() {
    let registry = Registry::empty();
    registry.load("image/png,png,image/jpeg,jpg jpeg");
    registry.load("image/x-portable,png pnm");
    assert_eq!(registry.mime_type_of("a.png"), "image/x-portable");
    assert_eq!(registry.mime_type_of("a.jpg"), "image/jpeg");
    assert_eq!(registry.mime_type_of("a.pnm"), "image/x-portable");
    // image/png keeps its own list even though png moved away
    assert_eq!(registry.extensions_of_type("image/png"), vec!["png"]);
}

#[test]
fn malformed_groups_keep_empty_extensions() {
    let registry = Registry::empty();
    registry.load("image/x,a  b,image/y,");
    assert_eq!(registry.extensions_of_type("image/x"), vec!["a", "", "b"]);
    assert_eq!(registry.extensions_of_type("image/y"), vec![""]);
    // a file name without suffix looks up the empty extension
    assert_eq!(registry.mime_type_of("noext"), "image/y");
    assert_eq!(registry.mime_type_of("a.b"), "image/x");
}

#[test]
fn seed_round_trips_through_wire_format() {
    let registry = Registry::new();
    let text = registry.to_table().to_string();
    assert!(text.starts_with("application/msword,doc dot,application/pdf,pdf,"));
    assert!(text.ends_with(",application/octet-stream,exe"));
    let table: Table = text.parse().unwrap();
    let copy = Registry::from_table(&table);
    assert_eq!(copy.fingerprint(), registry.fingerprint());
    assert_eq!(copy.mime_type_of("x.rtf"), "text/rtf");
}
