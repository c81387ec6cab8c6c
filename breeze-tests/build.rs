fn main() {
    // Generate the Light_UserDatabase classes for the integration tests
    // The generated PHP is only read by tests, so it won't affect the build
    let out_dir = std::env::var("OUT_DIR").unwrap();
    breeze_codegen::CodegenBuilder::new("../demos/example-schema.sql")
        .output_dir(std::path::Path::new(&out_dir).join("Api"))
        .namespace("Ling\\Light_UserDatabase\\Api")
        .table_prefix("lud")
        .factory_class_name("LightUserDatabaseApiFactory")
        .base_class_name("BaseLightUserDatabaseApi")
        .micro_permission()
        .generate()
        .expect("codegen failed");

    println!("cargo:rerun-if-changed=../demos/example-schema.sql");
}
