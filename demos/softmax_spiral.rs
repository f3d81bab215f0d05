//! Spiral data through a ReLU hidden layer and a softmax output, reporting how many
//! rows land on each predicted class and checking every row sums to one.

use log::{info, warn};

use rust_dense::{Activation, ChainBuilder, RandomInitializer, SpiralDataset, softmax};

fn main() -> rust_dense::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = RandomInitializer::new(0, 5)?;
    let data = SpiralDataset::generate(100, 3, &mut rng)?;
    for class in 0..data.classes() {
        info!("class {class}: {} points", data.class_count(class));
    }

    let mut chain = ChainBuilder::new(2)?
        .add_layer(3, Some(Activation::ReLU))?
        .add_layer(3, None)?
        .softmax_output()
        .build_with_initializer(&mut rng)?;

    let mut predicted = vec![0_usize; chain.output_size()];
    chain.run_batch(&data.to_inputs()?, |row| {
        let sum = softmax::sum_output(row.output());
        if (sum - 1.0).abs() > 1e-9 {
            warn!("row {} softmax sums to {sum}", row.row());
        }

        let argmax = row
            .output()
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map_or(0, |(i, _)| i);
        predicted[argmax] += 1;
    })?;

    println!("predicted class histogram: {predicted:?}");
    Ok(())
}
