//! RustMotionController - entry point
//!
//! On the board: wire the peripherals, pick the protocol from the operator
//! button and run the poll loop. On a host: the same loop on stdin/stdout
//! with simulated pins.

#[cfg(target_os = "espidf")]
mod firmware;
#[cfg(not(target_os = "espidf"))]
mod sim;

#[cfg(target_os = "espidf")]
fn main() {
    esp_idf_svc::sys::link_patches();

    if let Err(e) = firmware::run() {
        // Nothing else is initialised at this point; report and idle.
        println!("fatal: {}", e);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    let options = sim::Options::from_args(std::env::args().skip(1));
    sim::run(options);
}
