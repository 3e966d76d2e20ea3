//! FM Receiver Main Application
//!
//! Entry point for the STM32L031-based single-station FM receiver.
//! Measures the supply rail to decide between low-battery lockout,
//! fixture programming and normal operation, brings up the Si4702,
//! then runs the button tick task and the foreground control loop.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::rcc::{LsConfig, LseConfig, mux::ClockMux};
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::UartRx;
use embassy_stm32::{bind_interrupts, peripherals, usart};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use fm_firmware::button::ButtonInterpreter;
use fm_firmware::config::{I2C_FREQUENCY_HZ, RESET_PULSE_MS, TICK_PERIOD_MS};
use fm_firmware::control::{self, ProgrammingSession, Shared};
use fm_firmware::hal::eeprom::DataEeprom;
use fm_firmware::hal::led::StatusLed;
use fm_firmware::hal::prog::ProgrammerPort;
use fm_firmware::hal::supply::SupplySensor;
use fm_firmware::params::ParamStore;
use fm_firmware::power::{startup_gate, StartupGate};
use fm_firmware::tuner::Si4702;

bind_interrupts!(struct Irqs {
    ADC1_COMP => embassy_stm32::adc::InterruptHandler<peripherals::ADC1>;
});

/// State shared between the tick task and the foreground loop
static SHARED: Mutex<CriticalSectionRawMutex, RefCell<Shared>> =
    Mutex::new(RefCell::new(Shared::new()));

/// Low-power clock configuration: 2.097 MHz MSI core clock, no PLL,
/// LSE crystal driving the tick timer
fn low_power_clock_config() -> embassy_stm32::rcc::Config {
    embassy_stm32::rcc::Config {
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE2M),
        hsi: false,
        hse: None,
        pll: None,
        sys: embassy_stm32::rcc::Sysclk::MSI,
        ahb_pre: embassy_stm32::rcc::AHBPrescaler::DIV1,
        apb1_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        apb2_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        ls: LsConfig {
            rtc: embassy_stm32::rcc::RtcClockSource::LSE,
            lsi: false,
            lse: Some(LseConfig {
                frequency: Hertz::hz(32768),
                mode: embassy_stm32::rcc::LseMode::Oscillator(
                    embassy_stm32::rcc::LseDrive::Low,
                ),
            }),
        },
        voltage_scale: embassy_stm32::rcc::VoltageScale::RANGE1,
        mux: ClockMux::default(),
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("FM receiver firmware v{}", env!("CARGO_PKG_VERSION"));

    let mut config = embassy_stm32::Config::default();
    config.rcc = low_power_clock_config();
    let p = embassy_stm32::init(config);

    let mut led = StatusLed::new(Output::new(p.PA1, Level::Low, Speed::Low));
    let button = Input::new(p.PA0, Pull::Up);

    // Power-on acknowledgment blink.
    led.on();
    Timer::after_millis(100).await;
    led.off();

    let mut params = ParamStore::new(DataEeprom::new());

    let mut supply = SupplySensor::new(Adc::new(p.ADC1, Irqs));
    let voltage = supply.measure();
    info!("supply: {}", voltage);

    match startup_gate(voltage) {
        StartupGate::LowBattery => {
            warn!("supply below lockout threshold, not starting receiver");
            low_battery_loop(led).await;
        }
        StartupGate::Programming => {
            info!("fixture supply detected, entering programming session");
            let rx = UartRx::new_blocking(p.USART2, p.PA3, usart::Config::default())
                .expect("usart2 init");
            programming_loop(ProgrammerPort::new(rx), params, led).await;
        }
        StartupGate::Normal => {}
    }

    let stored = match params.reconcile() {
        Ok(record) => record,
        Err(_) => {
            // EEPROM range errors cannot occur with the fixed layout.
            fm_firmware::params::ParamRecord::factory_default()
        }
    };
    info!(
        "stored station: channel {} on {}",
        stored.channel, stored.band
    );

    // Bus-mode selection: SDA held low while reset releases puts the
    // Si4702 into 2-wire mode. The SDA override is scoped so the pin
    // is free again before the I2C peripheral claims it.
    let mut tuner_rst = Output::new(p.PA4, Level::Low, Speed::Low);
    {
        let _sda_low = Output::new(p.PA10.reborrow(), Level::Low, Speed::Low);
        Timer::after_millis(u64::from(RESET_PULSE_MS)).await;
        tuner_rst.set_high();
        Timer::after_millis(u64::from(RESET_PULSE_MS)).await;
    }

    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PA9,
        p.PA10,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );
    let mut radio = Si4702::new(i2c, Delay);
    match radio.power_up(&stored) {
        Ok(()) => info!("tuner powered up"),
        Err(_) => warn!("tuner bring-up failed, continuing for diagnostics"),
    }

    spawner.spawn(tick_task(button)).unwrap();

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(TICK_PERIOD_MS)));
    loop {
        ticker.next().await;
        let duty = SHARED.lock(|cell| {
            let mut shared = cell.borrow_mut();
            control::service(&mut shared, &mut radio, &mut params)
        });
        match duty {
            Ok(duty) => led.set_duty(duty),
            Err(_) => warn!("foreground service failed"),
        }
    }
}

/// Sample the button and advance the mode machine every 10 ms
#[embassy_executor::task]
async fn tick_task(button: Input<'static>) {
    let mut interpreter = ButtonInterpreter::new();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(TICK_PERIOD_MS)));
    loop {
        ticker.next().await;
        let pressed = button.is_low();
        SHARED.lock(|cell| {
            let mut shared = cell.borrow_mut();
            shared.ticks = shared.ticks.wrapping_add(1);
            if let Some(event) = interpreter.tick(pressed) {
                shared.handle_button(event);
            }
        });
    }
}

/// Terminal state for a depleted battery: slow blink, receiver off
async fn low_battery_loop(mut led: StatusLed) -> ! {
    loop {
        led.on();
        Timer::after_millis(50).await;
        led.off();
        Timer::after_secs(2).await;
    }
}

/// Service the programming fixture until power is removed
///
/// The LED blinks fast while idle and acknowledges each programmed
/// channel with a short solid period.
async fn programming_loop(
    mut port: ProgrammerPort,
    mut params: ParamStore<DataEeprom>,
    mut led: StatusLed,
) -> ! {
    let mut session = ProgrammingSession::new();
    loop {
        match session.poll(&mut port, &mut params) {
            Ok(Some(channel)) => {
                info!("programmed channel {}", channel);
                led.on();
                Timer::after_millis(500).await;
            }
            Ok(None) => {}
            Err(_) => warn!("programming write failed"),
        }
        led.toggle();
        Timer::after_millis(100).await;
    }
}
