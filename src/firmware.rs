//! Board bring-up for the LOLIN D32 Pro
//!
//! TFT on the VSPI bus (shared with the touch controller), DF2301Q on I2C0.

use anyhow::anyhow;

use esp_idf_svc::hal::delay::{Delay, FreeRtos};
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::spi;
use esp_idf_svc::hal::units::Hertz;

use voicelog::df2301q::Df2301q;
use voicelog::ili9341::Ili9341;
use voicelog::screen::TextConsole;
use voicelog::{Settings, VoiceLog};

pub fn run() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let settings = Settings::default();

    let peripherals = Peripherals::take().expect("Could not take peripherals");
    let pins = peripherals.pins;

    // The touch controller is never read but sits on the same bus
    log::info!("Deselecting touch controller");
    let mut touch_cs = PinDriver::output(pins.gpio12)?; // Pins::TS_CS
    touch_cs.set_high()?;

    log::info!("Configuring SPI for the TFT");
    let spi = spi::SpiDeviceDriver::new_single(
        peripherals.spi3,
        pins.gpio18,                                        // SCK - Pins::SCK
        pins.gpio23,                                        // MOSI - Pins::MOSI
        Some(pins.gpio19),                                  // MISO - Pins::MISO
        Some(pins.gpio14),                                  // CS - Pins::TFT_CS
        &spi::SpiDriverConfig::new(),
        &spi::SpiConfig::new().baudrate(Hertz(settings.spi_baudrate)),
    )?;

    let mut delay = Delay::default();

    let tft = Ili9341::new(
        spi,
        PinDriver::output(pins.gpio27)?, // Pins::TFT_DC
        PinDriver::output(pins.gpio33)?, // Pins::TFT_RST
        settings.rotation,
        &mut delay,
    )
    .map_err(|e| anyhow!("TFT init failed: {:?}", e))?;

    log::info!("Configuring I2C for the voice module");
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio21, // SDA - Pins::VOICE_SDA
        pins.gpio22, // SCL - Pins::VOICE_SCL
        &I2cConfig::new().baudrate(Hertz(settings.i2c_baudrate)),
    )?;

    let mut app = VoiceLog::new(TextConsole::new(tft), Df2301q::new(i2c), FreeRtos, settings);

    app.show_banner()
        .map_err(|e| anyhow!("Failed to draw banner: {:?}", e))?;
    app.start()?;

    app.run()
}
