//! A 4 -> 5 -> 2 chain over a fixed batch of three rows, forwarding layer by layer.

use rust_dense::{DenseLayer, InputView, Inputs, RandomInitializer, forward};

fn print_row(batch: usize, name: &str, values: &[f64]) {
    let values: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    println!("batch: {batch} {name}: {}", values.join(" "));
}

fn main() -> rust_dense::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = RandomInitializer::with_seed(0);
    let mut layer1 = DenseLayer::new(4, 5, None, &mut rng)?;
    let mut layer2 = DenseLayer::new(5, 2, None, &mut rng)?;

    let batch = Inputs::from_rows(&[
        [1.0, 2.0, 3.0, 2.5],
        [2.0, 5.0, -1.0, 2.0],
        [-1.5, 2.7, 3.3, -0.8],
    ])?;

    for (i, row) in batch.rows().enumerate() {
        forward(&InputView(row), &mut layer1)?;
        print_row(i, "layerX_output", layer1.output());

        forward(&layer1, &mut layer2)?;
        print_row(i, "layerY_output", layer2.output());
    }

    Ok(())
}
