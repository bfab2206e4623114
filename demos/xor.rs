use mimir_net::{train_samples, MimirNet, NetError};

fn main() -> Result<(), NetError> {
    let mut rng = rand::thread_rng();
    let mut net = MimirNet::new(2, 1, &[2], 0.5, &mut rng)?;

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![
        vec![0.0],
        vec![1.0],
        vec![1.0],
        vec![0.0],
    ];

    // 20,000 random single-example draws, reported in rounds of 2,000.
    for round in 1..=10 {
        let loss = train_samples(&mut net, &inputs, &targets, 2_000, &mut rng)?;
        println!("Round {round}: loss = {loss:.6}");
    }

    for input in &inputs {
        let output = net.feedforward(input)?;
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }
    Ok(())
}
