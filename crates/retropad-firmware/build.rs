use std::env;

fn main() {
    // Tell cargo to rerun if the IDF configuration changes
    println!("cargo:rerun-if-env-changed=ESP_IDF_SDKCONFIG_DEFAULTS");

    if env::var("ESP_IDF_SDKCONFIG_DEFAULTS").is_err() {
        eprintln!("NOTE: ESP_IDF_SDKCONFIG_DEFAULTS not set, using IDF defaults.");
    }

    embuild::espidf::sysenv::output();
}
