//! symlogic CLI: runs each algorithm over the bundled samples and prints
//! its trace.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use symlogic::chaining::{forward_chain, ChainingConfig, ProofTree};
use symlogic::propositional::{tt_entails, Prop};
use symlogic::samples;
use symlogic::search::{alpha_beta, anneal, AnnealingConfig};
use symlogic::syntax::Predicate;
use symlogic::unify::general::{resolve, unify_traced, Expr};

#[derive(Parser)]
#[command(name = "symlogic", version, about = "Textbook symbolic-AI algorithms with traces")]
struct Cli {
    /// Emit structured results as JSON instead of text traces.
    #[arg(long, global = true)]
    json: bool,

    /// Increase diagnostic logging on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Forward chaining over the criminal knowledge base.
    Forward(ForwardArgs),
    /// General unification of two nested expressions.
    Unify(UnifyArgs),
    /// CNF conversion and resolution refutation for the peanuts example.
    Fol,
    /// Truth-table entailment checks.
    TruthTable(TruthTableArgs),
    /// Alpha-beta search over the sample game tree.
    AlphaBeta(AlphaBetaArgs),
    /// Simulated annealing for N-queens.
    Anneal(AnnealArgs),
    /// Run every sample with default settings.
    All,
}

#[derive(Args)]
struct ForwardArgs {
    /// Ground query to check after chaining.
    #[arg(long, default_value = samples::CRIMINAL_QUERY)]
    query: String,
    /// Leave this seed fact out (repeatable).
    #[arg(long = "without", value_name = "FACT")]
    without: Vec<String>,
    /// Stop after this many passes.
    #[arg(long)]
    max_passes: Option<usize>,
}

#[derive(Args)]
struct UnifyArgs {
    #[arg(long, default_value = samples::UNIFY_LEFT)]
    left: String,
    #[arg(long, default_value = samples::UNIFY_RIGHT)]
    right: String,
}

#[derive(Args)]
struct TruthTableArgs {
    #[arg(long, default_value = samples::PROP_KB)]
    kb: String,
    /// Query to check (repeatable; defaults to the sample queries).
    #[arg(long)]
    query: Vec<String>,
    /// Symbols to enumerate, comma separated (defaults to those mentioned).
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,
}

#[derive(Args)]
struct AlphaBetaArgs {
    /// Start with the minimizing player at the root.
    #[arg(long)]
    min: bool,
}

#[derive(Args)]
struct AnnealArgs {
    /// Board size.
    #[arg(short, long, default_value_t = 8)]
    n: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 100.0)]
    initial_temp: f64,
    #[arg(long, default_value_t = 0.95)]
    cooling_rate: f64,
    #[arg(long, default_value_t = 1.0)]
    stopping_temp: f64,
}

impl Default for ForwardArgs {
    fn default() -> Self {
        ForwardArgs {
            query: samples::CRIMINAL_QUERY.to_string(),
            without: Vec::new(),
            max_passes: None,
        }
    }
}

impl Default for UnifyArgs {
    fn default() -> Self {
        UnifyArgs {
            left: samples::UNIFY_LEFT.to_string(),
            right: samples::UNIFY_RIGHT.to_string(),
        }
    }
}

impl Default for TruthTableArgs {
    fn default() -> Self {
        TruthTableArgs {
            kb: samples::PROP_KB.to_string(),
            query: Vec::new(),
            symbols: Vec::new(),
        }
    }
}

impl Default for AnnealArgs {
    fn default() -> Self {
        let config = AnnealingConfig::default();
        AnnealArgs {
            n: 8,
            seed: None,
            initial_temp: config.initial_temp,
            cooling_rate: config.cooling_rate,
            stopping_temp: config.stopping_temp,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "symlogic=debug",
        _ => "symlogic=trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    } else {
        EnvFilter::new(default)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Forward(args) => run_forward(&args, cli.json),
        Command::Unify(args) => run_unify(&args, cli.json),
        Command::Fol => run_fol(cli.json),
        Command::TruthTable(args) => run_truth_table(&args, cli.json),
        Command::AlphaBeta(args) => run_alpha_beta(&args, cli.json),
        Command::Anneal(args) => run_anneal(&args, cli.json),
        Command::All => run_all(cli.json),
    }
}

fn run_all(as_json: bool) -> Result<()> {
    let sections: [(&str, fn(bool) -> Result<()>); 6] = [
        ("Forward chaining", |j| run_forward(&ForwardArgs::default(), j)),
        ("Unification", |j| run_unify(&UnifyArgs::default(), j)),
        ("First-order logic", run_fol),
        ("Truth tables", |j| run_truth_table(&TruthTableArgs::default(), j)),
        ("Alpha-beta", |j| run_alpha_beta(&AlphaBetaArgs { min: false }, j)),
        ("Simulated annealing", |j| run_anneal(&AnnealArgs::default(), j)),
    ];
    for (title, run) in sections {
        if !as_json {
            println!("=== {} ===\n", title);
        }
        run(as_json)?;
        if !as_json {
            println!();
        }
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing result")?;
    println!("{}", text);
    Ok(())
}

fn run_forward(args: &ForwardArgs, as_json: bool) -> Result<()> {
    let dropped: Vec<Predicate> = args
        .without
        .iter()
        .map(|f| Predicate::parse_fact(f))
        .collect::<Result<_, _>>()
        .context("parsing --without fact")?;
    let mut seeds = Vec::new();
    for fact in samples::CRIMINAL_FACTS {
        let parsed = Predicate::parse_fact(fact).context("parsing sample fact")?;
        if !dropped.contains(&parsed) {
            seeds.push(*fact);
        }
    }

    let mut kb = samples::criminal_kb_with(&seeds).context("building knowledge base")?;
    let config = ChainingConfig {
        max_passes: args.max_passes,
    };
    let derivation = forward_chain(&mut kb, &config);
    let goal = Predicate::parse_fact(&args.query).context("parsing query")?;
    let holds = kb.contains(&goal);
    let proof = ProofTree::build(&goal, derivation.steps());

    if as_json {
        return print_json(&json!({
            "query": goal,
            "holds": holds,
            "derivation": derivation,
            "facts": kb.sorted_facts(),
            "proof": holds.then_some(&proof),
        }));
    }

    for step in derivation.steps() {
        println!(
            "Derived: {} by rule {} with substitution {}",
            step.derived, step.rule, step.substitution
        );
    }
    println!("\nFacts after forward chaining:");
    for fact in kb.sorted_facts() {
        println!(" - {}", fact);
    }
    println!("\nDerivation steps:");
    for (i, step) in derivation.steps().iter().enumerate() {
        println!("Step {}: {}\n", i + 1, step);
    }
    if !derivation.reached_fixpoint {
        println!("Stopped after {} passes before the fixed point.\n", derivation.passes);
    }
    if holds {
        println!("Query '{}' is TRUE (derived)", goal);
        print!("\nProof tree for query '{}':\n{}", goal, proof);
    } else {
        println!("Query '{}' could NOT be derived", goal);
    }
    Ok(())
}

fn run_unify(args: &UnifyArgs, as_json: bool) -> Result<()> {
    let left = Expr::parse(&args.left).context("parsing left expression")?;
    let right = Expr::parse(&args.right).context("parsing right expression")?;
    let trace = unify_traced(&left, &right);

    if as_json {
        let (bindings, error) = match &trace.result {
            Ok(b) => (Some(b), None),
            Err(e) => (None, Some(e.to_string())),
        };
        return print_json(&json!({
            "left": left,
            "right": right,
            "events": trace.events,
            "bindings": bindings,
            "error": error,
        }));
    }

    for event in &trace.events {
        println!("{}", event);
    }
    match &trace.result {
        Ok(bindings) => {
            let rendered: Vec<String> = bindings
                .iter()
                .map(|(var, value)| format!("{}: {}", var, value))
                .collect();
            println!("\nUnifier: {{{}}}", rendered.join(", "));
            println!("Unified term: {}", resolve(&left, bindings));
        }
        Err(e) => println!("\nUnification failed: {}", e),
    }
    Ok(())
}

fn run_fol(as_json: bool) -> Result<()> {
    let statements = samples::peanuts_statements();
    let refutation = samples::peanuts_refutation().context("converting statements to CNF")?;
    let trace = refutation.replay();

    if as_json {
        let (steps, error) = match &trace {
            Ok(t) => (Some(&t.steps), None),
            Err(e) => (None, Some(e.to_string())),
        };
        return print_json(&json!({
            "statements": statements
                .iter()
                .map(|(label, f)| json!({ "label": label, "formula": f.to_string() }))
                .collect::<Vec<_>>(),
            "clauses": refutation.premises,
            "negated_goal": refutation.negated_goal,
            "steps": steps,
            "error": error,
        }));
    }

    println!("Statements:");
    for (label, formula) in &statements {
        println!("{}. {}", label, formula);
    }
    println!("\nClauses (standardized apart):");
    for (i, clause) in refutation.premises.iter().enumerate() {
        println!("{}. {}", i + 1, clause);
    }
    println!(
        "{}. {}  (negated goal)",
        refutation.goal_number(),
        refutation.negated_goal
    );

    println!("\nResolution:");
    let trace = trace.context("replaying refutation")?;
    for step in &trace.steps {
        println!("{}", step);
    }
    println!("\nContradiction reached, so likes(John, Peanuts) holds.");
    Ok(())
}

fn run_truth_table(args: &TruthTableArgs, as_json: bool) -> Result<()> {
    let kb = Prop::parse(&args.kb).context("parsing knowledge base")?;
    let queries: Vec<String> = if args.query.is_empty() {
        samples::PROP_QUERIES.iter().map(|q| q.to_string()).collect()
    } else {
        args.query.clone()
    };

    let mut tables = Vec::new();
    for source in &queries {
        let query = Prop::parse(source).with_context(|| format!("parsing query `{}`", source))?;
        let symbols = if args.symbols.is_empty() {
            let mut all: Vec<String> = kb
                .symbols()
                .union(&query.symbols())
                .map(|s| s.to_string())
                .collect();
            all.sort();
            all
        } else {
            args.symbols.clone()
        };
        let table = tt_entails(&kb, &query, symbols.as_slice())
            .with_context(|| format!("evaluating `{}`", source))?;
        if !as_json {
            println!("Query: {}\n", query);
            println!("{}\n", table);
        }
        tables.push(table);
    }

    if as_json {
        return print_json(&json!(tables));
    }
    Ok(())
}

fn run_alpha_beta(args: &AlphaBetaArgs, as_json: bool) -> Result<()> {
    let tree = samples::game_tree();
    let maximizing = !args.min;
    let outcome = alpha_beta(&tree, samples::GAME_ROOT, maximizing).context("searching game tree")?;

    if as_json {
        return print_json(&json!(outcome));
    }

    print!(
        "{}",
        tree.render_ascii(samples::GAME_ROOT, maximizing)
            .context("rendering game tree")?
    );
    println!();
    for event in &outcome.events {
        println!("{}", event);
    }
    println!(
        "\nBest achievable value at root ({}): {}",
        samples::GAME_ROOT,
        outcome.value
    );
    if !outcome.pruned.is_empty() {
        println!("Pruned: {}", outcome.pruned.join(", "));
    }
    Ok(())
}

fn run_anneal(args: &AnnealArgs, as_json: bool) -> Result<()> {
    let config = AnnealingConfig {
        initial_temp: args.initial_temp,
        cooling_rate: args.cooling_rate,
        stopping_temp: args.stopping_temp,
        seed: args.seed,
    };
    let mut rng = config.rng();
    let outcome = anneal(args.n, &config, &mut rng).context("running simulated annealing")?;

    if as_json {
        return print_json(&json!(outcome));
    }

    println!("Initial board:\n{}", outcome.initial);
    println!("Initial cost: {}\n", outcome.initial_cost);
    for step in &outcome.steps {
        println!("{}", step);
    }
    println!("\nFinal board:\n{}", outcome.board);
    println!("Final cost: {}", outcome.cost);
    if outcome.solved() {
        println!("Goal state reached!");
    } else {
        println!("Terminated before reaching goal.");
    }
    Ok(())
}
