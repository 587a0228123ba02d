#![no_std]
#![no_main]

use cyw43_pio::{PioSpi, RM2_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, DhcpConfig, Stack, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use led_switch::app::AppState;
use led_switch::board::{Cyw43Station, LedActuator, OnboardLed};
use led_switch::config::Config;
use led_switch::heartbeat::heartbeat;
use led_switch::network;
use led_switch::server;
use led_switch::template::Template;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

// Program metadata
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"Pico 2 W LED switch"),
    embassy_rp::binary_info::rp_program_description!(
        c"Switch an external LED over HTTP"
    ),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

#[embassy_executor::task]
async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn http_server_task(
    stack: Stack<'static>,
    port: u16,
    mut app: AppState<'static, LedActuator>,
) -> ! {
    server::serve(stack, port, &mut app).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let config = unwrap!(Config::from_env());
    let p = embassy_rp::init(Default::default());

    let led = LedActuator::new(Output::new(led_switch::actuator_pin!(p), Level::Low));

    let fw = include_bytes!("../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        RM2_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;

    spawner.spawn(cyw43_task(runner).expect("Failed to spawn cyw43 task"));

    let mut dhcp = DhcpConfig::default();
    match heapless::String::try_from(config.wifi.hostname) {
        Ok(hostname) => dhcp.hostname = Some(hostname),
        Err(_) => warn!("network: hostname {} too long, not set", config.wifi.hostname),
    }

    let seed = 0x0123_4567_89ab_cdef;

    static RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(dhcp),
        RESOURCES.init(StackResources::<4>::new()),
        seed,
    );

    spawner.spawn(net_task(runner).expect("Failed to spawn net task"));

    info!("Connecting to network...");
    let mut station = Cyw43Station::new(&mut control, stack, clm);
    let address = match network::connect(&mut station, &config.wifi).await {
        Ok(address) => address,
        Err(e) => defmt::panic!("{}", e),
    };
    info!("ip = {}", address);

    info!("Reading template...");
    let template = unwrap!(Template::new(config.template));

    info!("Setting up webserver...");
    let app = AppState::new(led, template);
    spawner.spawn(
        http_server_task(stack, config.server.port, app).expect("Failed to spawn HTTP server"),
    );

    info!("Enable heartbeat...");
    heartbeat(&mut OnboardLed::new(control)).await
}
