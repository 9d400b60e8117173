mod integration {
    mod common;
    mod deletion_tests;
    mod manifest_tests;
    mod pipeline_tests;
}
