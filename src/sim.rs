//! Host simulator: the firmware loop on stdin/stdout with recorded pins

use std::convert::Infallible;
use std::fmt;
use std::io::{self, Read, Write as _};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use rust_motion_controller::console::{write_status, Console, Menu, Status};
use rust_motion_controller::hal::{CharSource, Clock};
use rust_motion_controller::log_drain::LogDrain;
use rust_motion_controller::logging::LogLevel;
use rust_motion_controller::{rt_debug, rt_info, run_program, RobotConfig, LOG_STREAM, PRESET_PROGRAM};
use rust_motion_controller::{Robot, RobotPins};

/// Command line switches
#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Start in the M2M menu (as if the button was not held)
    pub machine: bool,
    /// Run the preset program once after boot
    pub program: bool,
    /// Log at debug level
    pub verbose: bool,
}

impl Options {
    pub fn from_args(args: impl Iterator<Item = String>) -> Self {
        let mut options = Self::default();
        for arg in args {
            match arg.as_str() {
                "--m2m" => options.machine = true,
                "--program" => options.program = true,
                "-v" | "--verbose" => options.verbose = true,
                other => eprintln!("ignoring unknown argument {}", other),
            }
        }
        options
    }
}

/// Monotonic clock from process start
#[derive(Clone, Copy)]
struct StdClock(Instant);

impl Clock for StdClock {
    fn now_us(&self) -> u64 {
        self.0.elapsed().as_micros() as u64
    }
}

struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// Output line that only remembers its level
#[derive(Default)]
struct SimPin {
    high: bool,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// PWM channel with 1 µs resolution over a 20 ms frame
#[derive(Default)]
struct SimPwm {
    duty: u16,
}

impl pwm::ErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        20_000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

/// Bytes read from stdin on a helper thread
struct StdinSource(Receiver<u8>);

impl StdinSource {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for byte in io::stdin().lock().bytes() {
                let Ok(byte) = byte else { break };
                if tx.send(byte).is_err() {
                    break;
                }
            }
        });
        Self(rx)
    }
}

impl CharSource for StdinSource {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.try_recv().ok()
    }
}

struct StdoutSink;

impl fmt::Write for StdoutSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut stdout = io::stdout().lock();
        stdout.write_all(s.as_bytes()).map_err(|_| fmt::Error)?;
        stdout.flush().map_err(|_| fmt::Error)
    }
}

fn coils() -> [SimPin; 4] {
    Default::default()
}

pub fn run(options: Options) {
    let config = RobotConfig::default();
    if options.verbose {
        LOG_STREAM.set_max_level(LogLevel::Debug);
    }

    let pins = RobotPins {
        left_wheel: coils(),
        right_wheel: coils(),
        m3: coils(),
        m4: coils(),
        servo_pwm: SimPwm::default(),
        servo_power: Some(SimPin::default()),
        ext_power: SimPin::default(),
    };
    let clock = StdClock(Instant::now());
    let mut robot = Robot::new(pins, clock, StdDelay, config);
    robot.init();

    let mut console = Console::new().with_pen_angles(config.pen_up_angle, config.pen_down_angle);
    let mut out = StdoutSink;
    let mut source = StdinSource::spawn();

    if options.machine {
        console.set_menu(Menu::Machine);
        write_status(&mut out, Status::Ok);
    } else {
        console.print_banner(&mut out);
    }
    rt_info!(LOG_STREAM, clock.now_us(), "simulator up, menu {:?}", console.menu());

    if options.program {
        run_program(PRESET_PROGRAM, &mut console, &mut robot, &mut out);
    }

    let mut drain = LogDrain::new();
    let action_poll_us = u64::from(config.action_poll_ms) * 1000;
    let mut last_action_us = 0u64;

    loop {
        let _ = console.poll(&mut source, &mut out);

        let now = clock.now_us();
        if now.saturating_sub(last_action_us) >= action_poll_us {
            last_action_us = now;
            if robot.handle_requests(&mut console, &mut out) {
                rt_debug!(
                    LOG_STREAM,
                    clock.now_us(),
                    "ext={} servo duty={}",
                    robot.ext_power().high,
                    robot.servo().pwm().duty
                );
            }
        }

        drain.run(&LOG_STREAM, &mut StderrSink, clock.now_us());

        thread::sleep(Duration::from_millis(u64::from(config.input_poll_ms)));
    }
}

/// Log lines go to stderr so stdout stays a clean console transcript
struct StderrSink;

impl fmt::Write for StderrSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        io::stderr().lock().write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
