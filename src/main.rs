//! Spiral data through a 2 -> 3 (ReLU) -> 3 (softmax) chain, printed row by row.

use log::info;

use rust_dense::{Activation, ChainBuilder, InitConfig, RandomInitializer, SpiralDataset};

const POINTS_PER_CLASS: usize = 100;
const CLASSES: usize = 3;

fn format_row(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> rust_dense::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let init = InitConfig {
        range_divisor: 5,
        ..InitConfig::default()
    };
    let mut rng = RandomInitializer::new(init.seed, init.range_divisor)?;

    let data = SpiralDataset::generate(POINTS_PER_CLASS, CLASSES, &mut rng)?;
    info!(
        "generated {} spiral points across {} classes",
        data.len(),
        data.classes()
    );

    let mut chain = ChainBuilder::new(2)?
        .init(init)?
        .add_layer(3, Some(Activation::ReLU))?
        .add_layer(3, None)?
        .softmax_output()
        .build_with_initializer(&mut rng)?;

    chain.run_batch(&data.to_inputs()?, |row| {
        let i = row.row();
        if let Some(hidden) = row.layer_output(0) {
            println!("batch: {i} layer1_output: {}", format_row(hidden));
        }
        println!("batch: {i} layer2_output: {}", format_row(row.logits()));
        println!("batch: {i} layer2_softmax: {}", format_row(row.output()));
        println!("--");
    })?;

    Ok(())
}
