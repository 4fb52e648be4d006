mod import_tests;
mod manifest_tests;
mod resolver_tests;
