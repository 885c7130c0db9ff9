//! Compares the naive and vectorized softmax loss on a random problem:
//! timing, agreement of loss and gradient, and sparse gradient checks.

use clap::{Parser, ValueEnum};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use softmax_linear::config::ProblemConfig;
use softmax_linear::dataset::Minibatch;
use softmax_linear::gradient_check::grad_check_sparse;
use softmax_linear::initializers::small_random_weights;
use softmax_linear::{LossError, LossEvaluator, Naive, Vectorized};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// 5 examples, 4 features, 3 classes
    Tiny,
    /// 500 examples, 3073 features, 10 classes
    Dev,
}

#[derive(Parser, Debug)]
#[command(
    name = "softmax-linear",
    about = "Naive vs vectorized softmax loss on a random problem",
    version
)]
struct Cli {
    /// Problem size preset.
    #[arg(short, long, value_enum, default_value_t = Preset::Dev)]
    preset: Preset,

    /// Seed for data, labels and weights.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Regularization strength used for the timed evaluations.
    #[arg(short, long)]
    reg: Option<f64>,

    /// Regularization strength used during the gradient checks.
    #[arg(long, default_value_t = 5e1)]
    check_reg: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), LossError> {
    let mut config = match cli.preset {
        Preset::Tiny => ProblemConfig::tiny(),
        Preset::Dev => ProblemConfig::dev(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(reg) = cli.reg {
        config = config.with_reg(reg);
    }
    config.validate()?;

    tracing::info!(
        n = config.num_train,
        d = config.dim,
        c = config.num_classes,
        reg = config.reg,
        seed = config.seed,
        "generating problem"
    );
    let mut rng = StdRng::seed_from_u64(config.seed);
    let batch = Minibatch::<f64>::random(&config, &mut rng)?;
    let w = small_random_weights::<f64, _>(
        config.dim,
        config.num_classes,
        config.weight_scale,
        &mut rng,
    )?;

    let (naive_loss, naive_grad) = timed(&Naive, &w, &batch, config.reg)?;
    let (vec_loss, vec_grad) = timed(&Vectorized, &w, &batch, config.reg)?;

    // Near-uniform predictions from tiny initial weights.
    tracing::info!(
        "sanity check: loss should be close to -log(1/C) = {:.6}",
        (config.num_classes as f64).ln()
    );

    let grad_difference = (&naive_grad - &vec_grad)
        .iter()
        .map(|d| d * d)
        .sum::<f64>()
        .sqrt();
    tracing::info!(
        loss_difference = (naive_loss - vec_loss).abs(),
        grad_difference,
        "naive vs vectorized"
    );

    for evaluator in [&Naive as &dyn LossEvaluator<f64>, &Vectorized] {
        let (_, analytic) = evaluator.evaluate(&w, &batch.x, &batch.y, cli.check_reg)?;
        let checks = grad_check_sparse(
            |w| {
                evaluator
                    .evaluate(w, &batch.x, &batch.y, cli.check_reg)
                    .map(|(loss, _)| loss)
            },
            &w,
            &analytic,
            config.grad_checks,
            1e-5,
            &mut rng,
        )?;
        let worst = checks.iter().map(|c| c.rel_error).fold(0.0, f64::max);
        tracing::info!(
            evaluator = evaluator.name(),
            checks = checks.len(),
            worst_rel_error = worst,
            "gradient check"
        );
    }

    Ok(())
}

fn timed(
    evaluator: &dyn LossEvaluator<f64>,
    w: &Array2<f64>,
    batch: &Minibatch<f64>,
    reg: f64,
) -> Result<(f64, Array2<f64>), LossError> {
    let start = Instant::now();
    let result = evaluator.evaluate(w, &batch.x, &batch.y, reg)?;
    tracing::info!(
        evaluator = evaluator.name(),
        loss = result.0,
        elapsed = ?start.elapsed(),
        "computed loss"
    );
    Ok(result)
}
