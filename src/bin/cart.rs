use cart_tree::data::dataset::Dataset;
use cart_tree::metrics::confusion::ClassificationMetrics;
use cart_tree::trees::classifier::{classify_all, DecisionTreeClassifier};
use cart_tree::trees::codec;
use cart_tree::trees::node::TreeNode;
use cart_tree::trees::params::{Criterion, TreeClassifierParams};
use clap::{Parser, Subcommand};
use csv::ReaderBuilder;
use log::info;
use nalgebra::{DMatrix, DVector};
use std::error::Error;
use std::path::{Path, PathBuf};

type Tree = TreeNode<String, String>;

#[derive(Parser)]
#[command(name = "cart")]
#[command(about = "Build and apply categorical decision trees")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tree from a CSV file whose last column is the class label
    Train {
        /// Training data (header row names the features)
        #[arg(short, long)]
        data: PathBuf,

        /// Output tree file
        #[arg(short, long, default_value = "tree.json")]
        output: PathBuf,

        /// Split criterion: gini, entropy or binary_gini
        #[arg(short, long, default_value = "gini")]
        criterion: String,

        /// Negative class label used by binary_gini
        #[arg(long)]
        negative: Option<String>,
    },

    /// Classify the rows of a CSV file with a saved tree
    Classify {
        /// Saved tree file
        #[arg(short, long)]
        model: PathBuf,

        /// Rows to classify (header row names the features)
        #[arg(short, long)]
        data: PathBuf,

        /// The last column holds the true label; report accuracy
        #[arg(long)]
        labeled: bool,

        /// Label reported for values the tree never saw
        #[arg(long, default_value = "N")]
        unknown: String,
    },

    /// Print a saved tree
    Show {
        /// Saved tree file
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Train on a random part of a CSV file and report accuracy on the rest
    Evaluate {
        /// Labeled data
        #[arg(short, long)]
        data: PathBuf,

        /// Share of rows used for training
        #[arg(long, default_value = "0.75")]
        train_size: f64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Split criterion: gini, entropy or binary_gini
        #[arg(short, long, default_value = "gini")]
        criterion: String,

        /// Negative class label used by binary_gini
        #[arg(long)]
        negative: Option<String>,

        /// Label reported for values the tree never saw
        #[arg(long, default_value = "N")]
        unknown: String,
    },
}

/// Reads a CSV file into its header and records.
fn read_csv(file_path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(file_path)?;
    let header = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}

/// Reads a labeled dataset: every column but the last is a feature.
fn read_file_classification(
    file_path: &Path,
) -> Result<(Dataset<String, String>, Vec<String>), Box<dyn Error>> {
    let (mut header, rows) = read_csv(file_path)?;
    if header.pop().is_none() {
        return Err(format!("{} has no columns", file_path.display()).into());
    }
    let dataset = Dataset::from_labeled_rows(rows)?;
    info!(
        "Loaded {} rows with {} features from {}",
        dataset.nrows(),
        dataset.nfeatures(),
        file_path.display()
    );
    Ok((dataset, header))
}

fn parse_params(
    criterion: &str,
    negative: Option<String>,
) -> Result<TreeClassifierParams<String>, Box<dyn Error>> {
    let mut params = TreeClassifierParams::new();
    params.set_criterion(Criterion::from_name(criterion, negative)?);
    Ok(params)
}

fn train(
    data: &Path,
    output: &Path,
    criterion: &str,
    negative: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let (dataset, feature_labels) = read_file_classification(data)?;
    let mut classifier = DecisionTreeClassifier::with_params(
        parse_params(criterion, negative)?,
        String::from("N"),
    );
    classifier.fit(&dataset, &feature_labels)?;
    let tree = classifier.tree().ok_or("Tree wasn't built.")?;
    codec::save(tree, output)?;
    println!("{}", tree);
    info!("Saved tree to {}", output.display());
    Ok(())
}

fn classify(
    model: &Path,
    data: &Path,
    labeled: bool,
    unknown: String,
) -> Result<(), Box<dyn Error>> {
    let tree: Tree = codec::load(model)?;
    let (header, rows) = read_csv(data)?;
    let feature_count = if labeled {
        header.len().saturating_sub(1)
    } else {
        header.len()
    };
    let feature_labels = &header[..feature_count];

    let mut values = Vec::with_capacity(rows.len() * feature_count);
    let mut truth = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(format!(
                "row {} has {} values, expected {}",
                index,
                row.len(),
                header.len()
            )
            .into());
        }
        values.extend(row[..feature_count].iter().cloned());
        truth.extend(row.get(feature_count).cloned());
    }
    let matrix = DMatrix::from_row_slice(rows.len(), feature_count, &values);

    let predictions = classify_all(&tree, feature_labels, &matrix, &unknown)?;
    for label in &predictions {
        println!("{}", label);
    }

    if labeled {
        let classifier = DecisionTreeClassifier::from_tree(tree, feature_labels.to_vec(), unknown);
        let accuracy =
            classifier.accuracy(&DVector::from_vec(truth), &DVector::from_vec(predictions))?;
        println!("Accuracy: {}%", accuracy * 100.0);
    }
    Ok(())
}

fn show(model: &Path) -> Result<(), Box<dyn Error>> {
    let tree: Tree = codec::load(model)?;
    println!("{}", tree);
    println!("depth: {}", tree.depth());
    println!("leaves: {}", tree.leaf_count());
    Ok(())
}

fn evaluate(
    data: &Path,
    train_size: f64,
    seed: Option<u64>,
    params: TreeClassifierParams<String>,
    unknown: String,
) -> Result<(), Box<dyn Error>> {
    let (dataset, feature_labels) = read_file_classification(data)?;
    let (train_dataset, test_dataset) = dataset.train_test_split(train_size, seed)?;

    let mut classifier = DecisionTreeClassifier::with_params(params, unknown);
    classifier.fit(&train_dataset, &feature_labels)?;
    let predictions = classifier.predict(&test_dataset.x)?;
    let accuracy = classifier.accuracy(&test_dataset.y, &predictions)?;
    println!(
        "Accuracy: {}% on {} held-out rows",
        accuracy * 100.0,
        test_dataset.nrows()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Train {
            data,
            output,
            criterion,
            negative,
        } => train(&data, &output, &criterion, negative),
        Commands::Classify {
            model,
            data,
            labeled,
            unknown,
        } => classify(&model, &data, labeled, unknown),
        Commands::Show { model } => show(&model),
        Commands::Evaluate {
            data,
            train_size,
            seed,
            criterion,
            negative,
            unknown,
        } => evaluate(
            &data,
            train_size,
            seed,
            parse_params(&criterion, negative)?,
            unknown,
        ),
    }
}
