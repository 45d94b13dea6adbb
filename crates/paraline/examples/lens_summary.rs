//! Evaluate a handful of Paraline parameter sets and print shape summaries.
//!
//! Shows the degenerate path too: `resolution = 2` leaves only two distinct
//! vertices, so the kernel returns the wire instead of a solid.

use paraline::prelude::*;

fn main() {
    let kernel = PolyKernel::default();
    let cases = [
        ParalineParams::default(),
        ParalineParams {
            h: 10.0,
            extrude_height: 2.5,
            resolution: 0.25,
        },
        ParalineParams {
            h: 5.0,
            extrude_height: 1.0,
            resolution: 2.0,
        },
    ];
    for params in cases {
        let feature = ParalineFeature::new(params).expect("valid params");
        let steps = num_steps(params.resolution).expect("valid resolution");
        match feature.execute(&kernel).expect("kernel builds a wire") {
            Shape::Solid(prism) => println!(
                "h={} res={} steps={steps} solid area={:.6} volume={:.6} vertices={}",
                params.h,
                params.resolution,
                prism.base().area(),
                prism.volume(),
                prism.vertex_count()
            ),
            Shape::Wire(wire) => println!(
                "h={} res={} steps={steps} wire length={:.6} closed={}",
                params.h,
                params.resolution,
                wire.length(),
                wire.is_closed()
            ),
        }
    }
}
