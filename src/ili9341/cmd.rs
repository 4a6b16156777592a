pub struct Cmd;
impl Cmd {
    // Init
    pub const SW_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const GAMMA_SET: u8 = 0x26;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
    pub const FRAME_RATE_CONTROL: u8 = 0xB1;
    pub const POWER_CONTROL_1: u8 = 0xC0;
    pub const POWER_CONTROL_2: u8 = 0xC1;
    pub const VCOM_CONTROL_1: u8 = 0xC5;
    pub const VCOM_CONTROL_2: u8 = 0xC7;

    // Drawing
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const PAGE_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
}

/// Memory access control (0x36) bits
pub struct Madctl;
impl Madctl {
    /// Row address order
    pub const MY: u8 = 0x80;
    /// Column address order
    pub const MX: u8 = 0x40;
    /// Row / column exchange
    pub const MV: u8 = 0x20;
    /// BGR panel
    pub const BGR: u8 = 0x08;
}

/*
Adafruit_ILI9341 begin() sends, after the reset:
0xEF, 0xCF, 0xED, 0xE8, 0xCB, 0xF7, 0xEA - undocumented power sequence
0xC0 / 0xC1 - Power control
0xC5 / 0xC7 - VCOM control
0x36 - Memory access control
0x3A - Pixel format (0x55 = 16 bit)
0xB1 - Frame rate
0x26 - Gamma curve
0x11 - Sleep out, 150 ms
0x29 - Display on, 150 ms
*/
