//! A single neuron with three inputs: `[1, 2, 3] · [3.1, 2.1, 8.7] + 3`.

use rust_dense::DenseLayer;

fn main() -> rust_dense::Result<()> {
    let mut neuron = DenseLayer::from_parts(3, 1, None, vec![3.1, 2.1, 8.7], vec![3.0])?;
    let out = neuron.forward(&[1.0, 2.0, 3.0])?;
    println!("{:.6}", out[0]);
    Ok(())
}
