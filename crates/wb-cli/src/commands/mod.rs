pub mod dice;
pub mod play;
pub mod roll;

use wb_engine::{DicePool, DieKind, ValidationIssue, validate_config};

/// Parse and validate dice specs, then load them into a fresh pool.
/// Specs look like `d20` or `2xd6`. Issues go to stderr; any error
/// aborts before the pool is built.
fn load_pool(specs: &[String], seed: Option<u64>) -> Result<DicePool, String> {
    let mut requests = Vec::with_capacity(specs.len());
    for spec in specs {
        requests.push(split_spec(spec)?);
    }

    let issues = validate_config(&requests);
    print_issues(&issues);
    if issues.iter().any(|i| i.is_error) {
        return Err("invalid dice request".into());
    }

    let mut pool = match seed {
        Some(seed) => DicePool::seeded(seed),
        None => DicePool::new(),
    };
    for (kind, count) in &requests {
        if let Some(kind) = DieKind::parse(kind) {
            pool.add_dice(kind, u32::try_from(*count).unwrap_or(0));
        }
    }
    Ok(pool)
}

/// Split a spec like `2xd6` into its kind text and count.
/// A bare kind (`d6`) means one die.
fn split_spec(spec: &str) -> Result<(String, i64), String> {
    let spec = spec.trim();
    match spec.split_once(['x', 'X']) {
        None => Ok((spec.to_string(), 1)),
        Some((count, kind)) => {
            let count = count
                .trim()
                .parse()
                .map_err(|_| format!("invalid dice spec '{spec}': count must be a number"))?;
            Ok((kind.trim().to_string(), count))
        }
    }
}

/// Print validation issues to stderr with a closing tally line.
fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }

    for issue in issues {
        eprintln!("{issue}");
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}
