use std::collections::HashSet;
use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/sample_catalog.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    assert!(
        catalog.get("version").and_then(|v| v.as_str()).is_some(),
        "\n\nCATALOG BUILD ERROR: Missing 'version' string\n"
    );

    let layouts = catalog
        .get("layouts")
        .and_then(|l| l.as_array())
        .unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: Missing 'layouts' array\n\
                 The catalog must have a top-level 'layouts' array.\n"
            );
        });

    let total_operations = validate_layouts(layouts);

    println!(
        "cargo:warning=Validated catalog: {} layouts, {total_operations} total operations",
        layouts.len()
    );
}

fn validate_layouts(layouts: &[serde_json::Value]) -> usize {
    let mut seen = HashSet::new();
    let mut total_operations = 0;

    for (i, layout) in layouts.iter().enumerate() {
        for field in ["tenant_id", "layout_id", "layout_code", "style_type"] {
            assert!(
                layout.get(field).is_some(),
                "\n\nCATALOG BUILD ERROR: Layout at index {i} missing '{field}' field\n"
            );
        }

        let layout_id = layout
            .get("layout_id")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Layout at index {i} has a non-integer 'layout_id'\n")
            });
        assert!(
            seen.insert(layout_id),
            "\n\nCATALOG BUILD ERROR: Duplicate layout_id {layout_id} (index {i})\n"
        );

        if let Some(operations) = layout.get("operations").and_then(|o| o.as_array()) {
            for (j, op) in operations.iter().enumerate() {
                for field in ["operation_name", "machine_name", "sequence_number"] {
                    assert!(
                        op.get(field).is_some(),
                        "\n\nCATALOG BUILD ERROR: Layout {layout_id} operation {j} missing '{field}' field\n"
                    );
                }
            }
            total_operations += operations.len();
        }
    }

    total_operations
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/sample_catalog.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
