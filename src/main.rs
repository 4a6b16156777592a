#[cfg(target_os = "espidf")]
mod firmware;

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("voicelog is ESP32 firmware, build it for an espidf target");
}
