//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. Drawing goes to a
//! local page buffer; `present` sends only the pages that changed.

use embedded_hal::i2c::I2c;
use monodash_core::display::page_buffer::{PAGES, WIDTH, HEIGHT};
use monodash_core::display::{Area, DisplayError, DisplayTransport, MonoColor, PageBuffer};

/// Default SSD1306 I2C address (0x3D with SA0 high)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Control byte: command stream follows
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: GDDRAM data stream follows
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Power-up sequence for a 128x64 panel with the internal charge pump
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::SET_MEMORY_MODE,
    0x02,                  // Page addressing
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CONTRAST,
    0xCF, // High contrast
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::DISPLAY_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: PageBuffer,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new driver; nothing is sent until [`Ssd1306::init`]
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: PageBuffer::new(),
            initialized: false,
        }
    }

    /// Initialize the display and blank it
    pub fn init(&mut self) -> Result<(), DisplayError> {
        for &c in INIT_SEQUENCE {
            self.command(c)?;
        }
        self.initialized = true;

        self.buffer.clear();
        self.present()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Set contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Turn the panel on or off; frame memory is kept
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF })
    }

    /// Invert every pixel in hardware
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.command(if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        })
    }

    /// Local frame memory
    pub fn buffer(&self) -> &PageBuffer {
        &self.buffer
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .map_err(|_| DisplayError::Communication)
    }

    /// Send one page of the buffer
    fn write_page(&mut self, page: usize) -> Result<(), DisplayError> {
        let Some(bytes) = self.buffer.page(page) else {
            return Err(DisplayError::InvalidCoordinates);
        };
        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        data[1..].copy_from_slice(bytes);

        self.command(cmd::SET_PAGE_ADDR | page as u8)?;
        self.command(cmd::SET_LOW_COLUMN)?;
        self.command(cmd::SET_HIGH_COLUMN)?;
        self.i2c
            .write(self.address, &data)
            .map_err(|_| DisplayError::Communication)
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl<I2C: I2c> DisplayTransport for Ssd1306<I2C> {
    fn set_draw_color(&mut self, color: MonoColor) {
        self.buffer.set_draw_color(color);
    }

    fn draw_box(&mut self, area: Area) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.buffer.draw_box(area)
    }

    fn draw_pixel(&mut self, x: u16, y: u16) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.buffer.draw_pixel(x, y)
    }

    /// Send changed pages; pages that fail stay dirty for the next call
    fn present(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;

        let dirty = self.buffer.take_dirty_pages();
        for page in 0..PAGES {
            if dirty & (1 << page) == 0 {
                continue;
            }
            if let Err(e) = self.write_page(page) {
                // This page and everything after it still needs sending
                self.buffer.mark_dirty_pages(dirty & !((1u8 << page) - 1));
                #[cfg(feature = "defmt")]
                defmt::warn!("ssd1306 page {} write failed", page);
                return Err(e);
            }
        }
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }

    /// Frame memory is only handed out once the panel is initialized
    fn page_buffer_mut(&mut self) -> Option<&mut PageBuffer> {
        if self.initialized {
            Some(&mut self.buffer)
        } else {
            None
        }
    }
}
