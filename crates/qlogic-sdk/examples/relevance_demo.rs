//! Survey logic walkthrough
//!
//! This example demonstrates:
//! - Building an engine over a respondent's answers
//! - Evaluating relevance and screenout conditions
//! - Piping answers into question text
//! - Validating expressions at authoring time
//! - Seeded answer-option randomization
//!
//! Run with `RUST_LOG=debug` to see evaluation traces.

use qlogic_sdk::{ExpressionEngine, ExpressionValidator, Randomizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Survey Logic Example ===\n");

    let mut engine = ExpressionEngine::builder()
        .set_value("AGE", 34)
        .set_value("COUNTRY", "FR")
        .set_value("BRANDS_SQ001", "Y")
        .set_value("BRANDS_SQ002", "")
        .set_value("BRANDS_SQ003", "Y")
        .trace_evaluations(true)
        .build()?;

    // Relevance conditions
    let conditions = [
        "{AGE >= 18 AND AGE < 65}",
        "COUNTRY == 'FR' || COUNTRY == 'BE'",
        "countif(BRANDS_SQ001, BRANDS_SQ002, BRANDS_SQ003, 'Y') >= 2",
        "is_empty(BRANDS.SQ002)",
        "INCOME.NAOK > 50000",
    ];
    for condition in conditions {
        println!("{:<62} -> {}", condition, engine.evaluate(condition));
    }

    // Screenout after a late answer arrives
    engine.set_value("CONSENT", "N");
    println!("\nScreened out: {}", engine.evaluate("CONSENT != 'Y'"));

    // Piping
    println!("\n--- Piping ---");
    engine.set_value("NAME", "marie curie");
    engine.set_value("PRICE", 1249.5);
    let templates = [
        "Welcome back, {ucwords(NAME)}!",
        "You are {AGE} years old, {AGE + 1} next year.",
        "Budget: {number_format(PRICE * 12, 2)} per year",
        "Unanswered stays as written: {INCOME}",
    ];
    for template in templates {
        println!("{}", engine.pipe(template));
    }

    // Authoring-time validation
    println!("\n--- Validation ---");
    let validator = ExpressionValidator::new().with_known_variables(["AGE", "COUNTRY", "NAME"]);
    for expression in ["AGE > 18 AND COUNTRY == 'FR'", "AGE > (18", "mean(AGE) > 3 OR ZIP == 1"] {
        let result = validator.validate(expression);
        println!("{:<32} valid={}", expression, result.valid);
        for diagnostic in result.errors.iter().chain(&result.warnings) {
            println!("    {} {}", diagnostic.code, diagnostic.message);
        }
    }

    // Randomization keyed on the respondent
    println!("\n--- Randomization ---");
    let options = ["Apple", "Samsung", "Google", "Xiaomi", "Other"];
    let seed = "respondent-1042";
    println!("Shuffled: {:?}", Randomizer::shuffle(&options, seed));
    println!("Two picks: {:?}", Randomizer::select_random(&options, 2, seed));
    println!("Pairs: {}", Randomizer::combinations(&options[..4], 2).len());

    Ok(())
}
