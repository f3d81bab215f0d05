//! Build a chain from a JSON description and run one row through it.
//!
//! Run with `--features serde`.

use rust_dense::ChainConfig;

const CONFIG: &str = r#"{
    "input_size": 4,
    "layers": [
        {"size": 5, "activation": "sigmoid"},
        {"size": 2}
    ],
    "softmax_output": true,
    "init": {"seed": 42}
}"#;

fn main() -> rust_dense::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = ChainConfig::from_json_str(CONFIG)?;
    println!("{}", cfg.to_json_string_pretty()?);

    let mut chain = cfg.build()?;
    let out = chain.run(&[1.0, 2.0, 3.0, 2.5])?;
    println!("output: {out:?}");
    Ok(())
}
