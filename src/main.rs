//! Raspberry Pi Pico - shape motion demo
//!
//! Pico Display Pack buttons:
//!   A (GP12) = left paddle up,   B (GP13) = left paddle down
//!   X (GP14) = right paddle up,  Y (GP15) = right paddle down
//! Buzzer: GP28 (PWM slice 6, channel A)
//! LED (GP25): ON while the core is busy, OFF while it sleeps between ticks

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_time::{Delay, Duration, Ticker, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::Builder;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use shape_motion::config::{SCREEN_H, SCREEN_W, TICK_HZ};
use shape_motion::tone::half_duty;
use shape_motion::{Buzzer, GameConfig, GameState, SwitchMask, ToneDriver};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

/// PWM clock divider: 125 MHz / 64, so a period of 2000 cycles is ~1 kHz.
const TONE_DIVIDER: u8 = 64;

// --- Embassy bindings ---
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

#[embassy_executor::task]
async fn logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
}

/// Buzzer on one PWM slice: `top` is the period, channel A compare is half.
struct PwmTone<'d> {
    pwm: Pwm<'d>,
    config: pwm::Config,
}

impl<'d> PwmTone<'d> {
    fn new(pwm: Pwm<'d>, config: pwm::Config) -> Self {
        Self { pwm, config }
    }
}

impl ToneDriver for PwmTone<'_> {
    fn set_period(&mut self, cycles: u16) {
        self.config.enable = cycles != 0;
        self.config.top = cycles;
        self.config.compare_a = half_duty(cycles);
        self.pwm.set_config(&self.config);
    }
}

// --- Main ---
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // USB serial logger
    let usb_driver = Driver::new(p.USB, Irqs);
    unwrap!(spawner.spawn(logger_task(usb_driver)));
    Timer::after(Duration::from_secs(2)).await;
    log::info!("=== Shape Motion ===");

    // Onboard LED (GP25 on Pico)
    let mut led = Output::new(p.PIN_25, Level::High);

    // ST7789 display (Pico Display Pack)
    let _bl = Output::new(p.PIN_20, Level::High);
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 62_500_000;
    let spi_bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs_display = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs_display).unwrap();
    static DISPLAY_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
    let display_buf = DISPLAY_BUF.init([0u8; 1024]);
    let di = mipidsi::interface::SpiInterface::new(spi_device, dc, display_buf);
    let mut display = Builder::new(ST7789, di)
        .display_size(SCREEN_H as u16, SCREEN_W as u16)
        .display_offset(52, 40)
        .invert_colors(ColorInversion::Inverted)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .init(&mut Delay)
        .unwrap();
    display.clear(Rgb565::BLACK).unwrap();
    log::info!("Display ready!");

    // Switches (active-low, pull-up)
    //  [A]  [X]  <- paddle up
    //  [B]  [Y]  <- paddle down
    let btn_a = Input::new(p.PIN_12, Pull::Up);
    let btn_b = Input::new(p.PIN_13, Pull::Up);
    let btn_x = Input::new(p.PIN_14, Pull::Up);
    let btn_y = Input::new(p.PIN_15, Pull::Up);

    // Buzzer
    let mut tone_config = pwm::Config::default();
    tone_config.divider = TONE_DIVIDER.into();
    tone_config.enable = false;
    let tone_pwm = Pwm::new_output_a(p.PWM_SLICE6, p.PIN_28, tone_config.clone());
    let mut buzzer = Buzzer::new(PwmTone::new(tone_pwm, tone_config));

    let mut game = unwrap!(GameState::new(GameConfig::default()));
    game.draw_initial(&mut display).unwrap();
    if let Some(period) = game.config().startup_tone {
        buzzer.play(period);
    }
    info!("scene drawn, ticking at {} Hz", TICK_HZ);

    let mut ticker = Ticker::every(Duration::from_hz(TICK_HZ));

    loop {
        led.set_high();

        // Switch order: 0 = left up, 1 = left down, 2 = right down, 3 = right up
        let switches = SwitchMask::from_pressed([
            btn_a.is_low(),
            btn_b.is_low(),
            btn_y.is_low(),
            btn_x.is_low(),
        ]);
        game.on_tick(switches, &mut display).unwrap();

        if game.take_redraw() {
            game.draw_hud(&mut display).unwrap();
        }

        // Executor sleeps the core until the next tick.
        led.set_low();
        ticker.next().await;
    }
}
