//! Display interface using SPI
use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// Pixels sent per SPI transfer when streaming one color
const CHUNK_PIXELS: usize = 32;

/// The 4-wire SPI connection of the ILI9341 (chip select is handled by the SPI device)
pub struct DisplayInterface<SPI, DC, RST> {
    /// SPI device
    spi: SPI,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
}

impl<SPI, DC, RST> DisplayInterface<SPI, DC, RST> {
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        DisplayInterface { spi, dc, rst }
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST> DisplayInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Send the same 16 bit pixel `repetitions` times, used for solid fills
    pub(crate) fn data_x_times(&mut self, pixel: [u8; 2], repetitions: u32) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        let mut buffer = [0u8; CHUNK_PIXELS * 2];
        for chunk in buffer.chunks_exact_mut(2) {
            chunk.copy_from_slice(&pixel);
        }

        let full_chunks = repetitions as usize / CHUNK_PIXELS;
        let remainder = repetitions as usize % CHUNK_PIXELS;

        for _ in 0..full_chunks {
            self.spi
                .write(&buffer)
                .map_err(|_| DisplayError::BusWriteError)?;
        }

        if remainder > 0 {
            self.spi
                .write(&buffer[..remainder * 2])
                .map_err(|_| DisplayError::BusWriteError)?;
        }

        log::trace!("Streamed {} pixels", repetitions);
        Ok(())
    }

    /// Hardware reset, the panel needs a while before it takes commands again
    pub(crate) fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(5);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(20);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(150);
        Ok(())
    }
}
