//! ILI9341 Display Driver Implementation
//!
//! Brings the panel up and exposes it as an `embedded-graphics` draw target.
//! Nothing is buffered: every fill or pixel goes straight to the panel RAM
//! through an address window.
//!
//! ### Pixel format
//!
//! The panel is put in 16 bit mode (`0x55`), pixels go out as big endian
//! RGB565, which is exactly the raw value of [`Rgb565`].

pub use display_interface::DisplayError;

use embedded_graphics::{
    pixelcolor::{
        raw::{RawData, RawU16},
        Rgb565,
    },
    prelude::*,
    primitives::Rectangle,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::ili9341::interface::DisplayInterface;
use crate::ili9341::{
    cmd::{Cmd, Madctl},
    Rotation, HEIGHT, WIDTH,
};

/// ILI9341 TFT Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
pub struct Ili9341<SPI, DC, RST> {
    /// The display interface
    interface: DisplayInterface<SPI, DC, RST>,
    rotation: Rotation,
}

impl<SPI, DC, RST> Ili9341<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create and initialize the display driver
    pub fn new(
        spi: SPI,
        dc: DC,
        rst: RST,
        rotation: Rotation,
        delay: &mut impl DelayNs,
    ) -> Result<Self, DisplayError> {
        let interface = DisplayInterface::new(spi, dc, rst);
        let mut ili9341 = Ili9341 {
            interface,
            rotation,
        };
        ili9341.init(delay)?;
        Ok(ili9341)
    }

    /// Reset and configure the panel, then switch it on
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        log::info!("Initializing ILI9341 display");

        self.interface.reset(delay)?;

        self.interface.cmd(Cmd::SW_RESET)?;
        delay.delay_ms(150);
        self.interface.cmd(Cmd::DISPLAY_OFF)?;

        // Power and VCOM levels of the Adafruit breakout boards
        self.interface.cmd_with_data(Cmd::POWER_CONTROL_1, &[0x23])?;
        self.interface.cmd_with_data(Cmd::POWER_CONTROL_2, &[0x10])?;
        self.interface.cmd_with_data(Cmd::VCOM_CONTROL_1, &[0x3E, 0x28])?;
        self.interface.cmd_with_data(Cmd::VCOM_CONTROL_2, &[0x86])?;

        self.write_rotation()?;
        self.interface.cmd_with_data(Cmd::PIXEL_FORMAT, &[0x55])?;
        self.interface.cmd_with_data(Cmd::FRAME_RATE_CONTROL, &[0x00, 0x18])?;
        self.interface.cmd_with_data(Cmd::GAMMA_SET, &[0x01])?;

        self.interface.cmd(Cmd::SLEEP_OUT)?;
        delay.delay_ms(150);
        self.interface.cmd(Cmd::DISPLAY_ON)?;
        delay.delay_ms(150);

        log::info!("ILI9341 ready, {:?}", self.rotation);
        Ok(())
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change the orientation; the contents already on the panel are kept
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.rotation = rotation;
        self.write_rotation()
    }

    fn write_rotation(&mut self) -> Result<(), DisplayError> {
        let madctl = match self.rotation {
            Rotation::Portrait => Madctl::MX | Madctl::BGR,
            Rotation::Landscape => Madctl::MV | Madctl::BGR,
            Rotation::PortraitFlipped => Madctl::MY | Madctl::BGR,
            Rotation::LandscapeFlipped => Madctl::MX | Madctl::MY | Madctl::MV | Madctl::BGR,
        };
        self.interface
            .cmd_with_data(Cmd::MEMORY_ACCESS_CONTROL, &[madctl])
    }

    /// Select the inclusive pixel window the next memory write fills
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.interface
            .cmd_with_data(Cmd::COLUMN_ADDRESS_SET, &[x0h, x0l, x1h, x1l])?;
        self.interface
            .cmd_with_data(Cmd::PAGE_ADDRESS_SET, &[y0h, y0l, y1h, y1l])?;
        self.interface.cmd(Cmd::MEMORY_WRITE)
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, DC, RST) {
        self.interface.release()
    }
}

fn pixel_bytes(color: Rgb565) -> [u8; 2] {
    RawU16::from(color).into_inner().to_be_bytes()
}

impl<SPI, DC, RST> OriginDimensions for Ili9341<SPI, DC, RST> {
    fn size(&self) -> Size {
        match self.rotation {
            Rotation::Portrait | Rotation::PortraitFlipped => {
                Size::new(u32::from(WIDTH), u32::from(HEIGHT))
            }
            Rotation::Landscape | Rotation::LandscapeFlipped => {
                Size::new(u32::from(HEIGHT), u32::from(WIDTH))
            }
        }
    }
}

impl<SPI, DC, RST> DrawTarget for Ili9341<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.interface.data(&pixel_bytes(color))?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        self.interface
            .data_x_times(pixel_bytes(color), area.size.width * area.size.height)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_solid(&self.bounding_box(), color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::tests::RecordingDelay;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::spi::Operation;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Frame {
        Cmd(u8),
        Data(Vec<u8>),
        Reset(bool),
    }

    #[derive(Default)]
    struct Bus {
        dc_high: bool,
        frames: Vec<Frame>,
    }

    type Shared = Rc<RefCell<Bus>>;

    struct FakeSpi(Shared);
    struct DcPin(Shared);
    struct RstPin(Shared);

    impl embedded_hal::spi::ErrorType for FakeSpi {
        type Error = Infallible;
    }

    impl SpiDevice for FakeSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            let mut guard = self.0.borrow_mut();
            let bus = &mut *guard;
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    if !bus.dc_high {
                        for b in bytes.iter() {
                            bus.frames.push(Frame::Cmd(*b));
                        }
                    } else if let Some(Frame::Data(data)) = bus.frames.last_mut() {
                        data.extend_from_slice(bytes);
                    } else {
                        bus.frames.push(Frame::Data(bytes.to_vec()));
                    }
                }
            }
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for DcPin {
        type Error = Infallible;
    }

    impl OutputPin for DcPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = true;
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for RstPin {
        type Error = Infallible;
    }

    impl OutputPin for RstPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().frames.push(Frame::Reset(false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().frames.push(Frame::Reset(true));
            Ok(())
        }
    }

    fn display(rotation: Rotation) -> (Ili9341<FakeSpi, DcPin, RstPin>, Shared) {
        let bus = Shared::default();
        let mut delay = RecordingDelay::default();
        let display = Ili9341::new(
            FakeSpi(bus.clone()),
            DcPin(bus.clone()),
            RstPin(bus.clone()),
            rotation,
            &mut delay,
        )
        .unwrap();
        (display, bus)
    }

    fn commands(bus: &Shared) -> Vec<u8> {
        bus.borrow()
            .frames
            .iter()
            .filter_map(|f| match f {
                Frame::Cmd(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn init_resets_then_switches_on() {
        let (_display, bus) = display(Rotation::Landscape);
        let frames = bus.borrow().frames.clone();
        assert_eq!(
            &frames[..4],
            &[
                Frame::Reset(true),
                Frame::Reset(false),
                Frame::Reset(true),
                Frame::Cmd(Cmd::SW_RESET)
            ]
        );

        let cmds = commands(&bus);
        assert_eq!(cmds.last(), Some(&Cmd::DISPLAY_ON));
        let pixfmt = frames
            .iter()
            .position(|f| *f == Frame::Cmd(Cmd::PIXEL_FORMAT))
            .unwrap();
        assert_eq!(frames[pixfmt + 1], Frame::Data(vec![0x55]));
        let madctl = frames
            .iter()
            .position(|f| *f == Frame::Cmd(Cmd::MEMORY_ACCESS_CONTROL))
            .unwrap();
        assert_eq!(frames[madctl + 1], Frame::Data(vec![Madctl::MV | Madctl::BGR]));
    }

    #[test]
    fn size_follows_rotation() {
        let (landscape, _) = display(Rotation::Landscape);
        assert_eq!(landscape.size(), Size::new(320, 240));
        let (mut portrait, bus) = display(Rotation::Portrait);
        assert_eq!(portrait.size(), Size::new(240, 320));

        portrait.set_rotation(Rotation::LandscapeFlipped).unwrap();
        assert_eq!(portrait.size(), Size::new(320, 240));
        assert_eq!(
            bus.borrow().frames.last(),
            Some(&Frame::Data(vec![
                Madctl::MX | Madctl::MY | Madctl::MV | Madctl::BGR
            ]))
        );
    }

    #[test]
    fn fill_is_clipped_and_streamed() {
        let (mut display, bus) = display(Rotation::Landscape);
        bus.borrow_mut().frames.clear();

        display
            .fill_solid(
                &Rectangle::new(Point::new(310, 230), Size::new(40, 40)),
                Rgb565::WHITE,
            )
            .unwrap();

        let frames = bus.borrow().frames.clone();
        assert_eq!(
            frames,
            vec![
                Frame::Cmd(Cmd::COLUMN_ADDRESS_SET),
                Frame::Data(vec![0x01, 0x36, 0x01, 0x3F]),
                Frame::Cmd(Cmd::PAGE_ADDRESS_SET),
                Frame::Data(vec![0x00, 230, 0x00, 239]),
                Frame::Cmd(Cmd::MEMORY_WRITE),
                Frame::Data([0xFF, 0xFF].repeat(100)),
            ]
        );
    }

    #[test]
    fn fill_outside_the_panel_sends_nothing() {
        let (mut display, bus) = display(Rotation::Landscape);
        bus.borrow_mut().frames.clear();
        display
            .fill_solid(
                &Rectangle::new(Point::new(400, 0), Size::new(10, 10)),
                Rgb565::RED,
            )
            .unwrap();
        assert!(bus.borrow().frames.is_empty());
    }

    #[test]
    fn pixels_outside_the_panel_are_skipped() {
        let (mut display, bus) = display(Rotation::Portrait);
        bus.borrow_mut().frames.clear();
        display
            .draw_iter([
                Pixel(Point::new(-1, 0), Rgb565::RED),
                Pixel(Point::new(1, 2), Rgb565::RED),
                Pixel(Point::new(240, 0), Rgb565::RED),
            ])
            .unwrap();
        assert_eq!(
            commands(&bus),
            vec![Cmd::COLUMN_ADDRESS_SET, Cmd::PAGE_ADDRESS_SET, Cmd::MEMORY_WRITE]
        );
        assert_eq!(
            bus.borrow().frames.last(),
            Some(&Frame::Data(vec![0xF8, 0x00]))
        );
    }

    #[test]
    fn text_console_draws_on_the_panel() {
        use crate::screen::{Surface, TextConsole};

        let (display, bus) = display(Rotation::Landscape);
        bus.borrow_mut().frames.clear();

        let mut console = TextConsole::new(display);
        console.fill_screen(Rgb565::BLACK).unwrap();
        console.println("45").unwrap();

        let cmds = commands(&bus);
        assert!(cmds.len() > 3);
        assert_eq!(&cmds[..3], &[Cmd::COLUMN_ADDRESS_SET, Cmd::PAGE_ADDRESS_SET, Cmd::MEMORY_WRITE]);
        assert_eq!(console.release().size(), Size::new(320, 240));
    }
}
