//! Quadrature encoder decoding tasks
//!
//! One task per wheel waits for edges on either encoder channel, shifts the
//! new pin pair through the transition decoder and accumulates the signed
//! tick delta into the wheel's published counter. Encoder glitches (both
//! channels flipping within one edge service) decode to zero and vanish
//! silently.

use crate::system::{
    quadrature::{self, QuadratureDecoder, Wheel},
    resources::{LeftEncoderResources, RightEncoderResources},
};
use defmt::{info, trace};
use embassy_futures::select::select;
use embassy_rp::gpio::{Input, Pull};

/// Left wheel encoder task
#[embassy_executor::task]
pub async fn encoder_read_left(r: LeftEncoderResources) {
    let a = Input::new(r.a_pin, Pull::Up);
    let b = Input::new(r.b_pin, Pull::Up);
    read_wheel(Wheel::Left, a, b).await;
}

/// Right wheel encoder task
#[embassy_executor::task]
pub async fn encoder_read_right(r: RightEncoderResources) {
    let a = Input::new(r.a_pin, Pull::Up);
    let b = Input::new(r.b_pin, Pull::Up);
    read_wheel(Wheel::Right, a, b).await;
}

/// Edge-driven decode loop for one wheel
async fn read_wheel(wheel: Wheel, mut a: Input<'static>, mut b: Input<'static>) {
    let mut decoder = QuadratureDecoder::new();
    decoder.sync(a.is_high(), b.is_high());
    info!("Encoder decoding started for {}", wheel);

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        let delta = decoder.step(a.is_high(), b.is_high());
        if delta != 0 {
            quadrature::add_ticks(wheel, delta);
            trace!("{} wheel ticks: {=i32}", wheel, quadrature::ticks(wheel));
        }
    }
}
