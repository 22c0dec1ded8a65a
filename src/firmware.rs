//! Board glue (ESP32-S3)

use core::fmt::{self, Write};

use esp_idf_svc::hal::delay::{FreeRtos, NON_BLOCK};
use esp_idf_svc::hal::gpio::{AnyInputPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use esp_idf_svc::hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::uart::{config::Config as UartConfig, UartDriver, UartRxDriver, UartTxDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use rust_motion_controller::config::board;
use rust_motion_controller::console::{write_status, Console, Menu, Status};
use rust_motion_controller::hal::{CharSource, Clock};
use rust_motion_controller::log_drain::LogDrain;
use rust_motion_controller::{rt_error, rt_info, run_program, RobotConfig, LOG_STREAM, PRESET_PROGRAM};
use rust_motion_controller::{Robot, RobotPins};

type OutPin = PinDriver<'static, AnyOutputPin, Output>;

/// Board start-up failure
#[derive(Debug)]
pub enum BootError {
    Esp(EspError),
    Config(rust_motion_controller::ConfigError),
}

impl From<EspError> for BootError {
    fn from(e: EspError) -> Self {
        BootError::Esp(e)
    }
}

impl From<rust_motion_controller::ConfigError> for BootError {
    fn from(e: rust_motion_controller::ConfigError) -> Self {
        BootError::Config(e)
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::Esp(e) => write!(f, "esp-idf: {}", e),
            BootError::Config(e) => write!(f, "{}", e),
        }
    }
}

/// esp_timer based microsecond clock
#[derive(Clone, Copy)]
struct EspClock;

impl Clock for EspClock {
    fn now_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time has no preconditions once the scheduler runs
        unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 }
    }
}

/// Non-blocking receive side of the link
struct UartSource<'d>(UartRxDriver<'d>);

impl CharSource for UartSource<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.0.read(&mut buf, NON_BLOCK) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }
}

/// Transmit side of the link as a text sink
struct UartSink<'d>(UartTxDriver<'d>);

impl Write for UartSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write(s.as_bytes()).map(|_| ()).map_err(|_| fmt::Error)
    }
}

fn output(pin: u8) -> Result<OutPin, EspError> {
    // SAFETY: every number comes from the board table and is claimed once
    PinDriver::output(unsafe { AnyOutputPin::new(i32::from(pin)) })
}

fn channel_pins(channel: u8) -> Result<[OutPin; 4], BootError> {
    let [a, b, c, d] = board::motor_pins(channel)?;
    Ok([output(a)?, output(b)?, output(c)?, output(d)?])
}

fn button_pressed(button: &PinDriver<'static, AnyInputPin, Input>) -> bool {
    button.is_low()
}

fn wait_release(button: &PinDriver<'static, AnyInputPin, Input>) {
    while button_pressed(button) {
        FreeRtos::delay_ms(100);
    }
}

pub fn run() -> Result<(), BootError> {
    let peripherals = Peripherals::take()?;
    let config = RobotConfig::default();

    let mut led = output(board::LED_PIN)?;
    let mut driver_enable = output(board::DRIVER_ENABLE_PIN)?;
    // SAFETY: board table pin, claimed once
    let mut button = PinDriver::input(unsafe { AnyInputPin::new(i32::from(board::BUTTON_PIN)) })?;
    button.set_pull(Pull::Up)?;
    led.set_high()?;
    driver_enable.set_high()?;

    let uart = UartDriver::new(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        Option::<AnyInputPin>::None,
        Option::<AnyOutputPin>::None,
        &UartConfig::default().baudrate(Hertz(board::BAUD)),
    )?;
    let (tx, rx) = uart.into_split();
    let mut out = UartSink(tx);
    let mut source = UartSource(rx);

    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(Hertz(50))
            .resolution(Resolution::Bits14),
    )?;
    // SAFETY: board table pin, claimed once
    let servo_pin = unsafe { AnyOutputPin::new(i32::from(board::SERVO_CONTROL_PIN)) };
    let servo_pwm = LedcDriver::new(peripherals.ledc.channel0, timer, servo_pin)?;

    let (left, right) = board::WHEEL_CHANNELS;
    let pins = RobotPins {
        left_wheel: channel_pins(left)?,
        right_wheel: channel_pins(right)?,
        m3: channel_pins(board::M3_CHANNEL)?,
        m4: channel_pins(board::M4_CHANNEL)?,
        servo_pwm,
        servo_power: board::SERVO_POWER_PIN.map(output).transpose()?,
        ext_power: output(board::EXT_POWER_PIN)?,
    };

    let clock = EspClock;
    let mut robot = Robot::new(pins, clock, FreeRtos, config);
    robot.init();

    let mut console = Console::new().with_pen_angles(config.pen_up_angle, config.pen_down_angle);

    FreeRtos::delay_ms(100);
    if button_pressed(&button) {
        console.print_banner(&mut out);
        wait_release(&button);
        // Long debounce
        FreeRtos::delay_ms(100);
    } else {
        console.set_menu(Menu::Machine);
        write_status(&mut out, Status::Ok);
    }
    rt_info!(LOG_STREAM, clock.now_us(), "boot menu {:?}", console.menu());

    let mut drain = LogDrain::new();
    let action_poll_us = u64::from(config.action_poll_ms) * 1000;
    let mut last_action_us = 0u64;

    loop {
        let _ = console.poll(&mut source, &mut out);

        let now = clock.now_us();
        if now.saturating_sub(last_action_us) >= action_poll_us {
            last_action_us = now;
            robot.handle_requests(&mut console, &mut out);

            if button_pressed(&button) {
                wait_release(&button);
                // Time to step away from the robot
                FreeRtos::delay_ms(1000);
                let rejected = run_program(PRESET_PROGRAM, &mut console, &mut robot, &mut out);
                if rejected > 0 {
                    rt_error!(LOG_STREAM, clock.now_us(), "preset: {} lines rejected", rejected);
                }
            }
        }

        // Log text would corrupt the M2M stream
        if console.protocol().is_console() {
            drain.run(&LOG_STREAM, &mut out, clock.now_us());
        }

        FreeRtos::delay_ms(config.input_poll_ms);
    }
}
