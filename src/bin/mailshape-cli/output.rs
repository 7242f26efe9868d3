#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::{Cli, Format};
use mailshape::ShapeReport;

pub fn write_reports(rows: &[ShapeReport], cli: &Cli) -> Result<()> {
    match cli.format {
        Format::Human => write_human(rows, cli),
        Format::Json => write_json(rows, cli),
        Format::Ndjson => write_ndjson(rows, cli),
        Format::Csv => write_csv(rows, cli),
    }
}

pub fn any_invalid(rows: &[ShapeReport]) -> bool {
    rows.iter().any(|row| !row.valid)
}

/// Ligne lisible : `[OK]` ou `[INVALID] <adresse> :: <raisons>`.
pub fn human_line(row: &ShapeReport) -> String {
    if row.valid {
        format!("[OK]    {}", row.original)
    } else {
        format!("[INVALID] {} :: {}", row.original, row.reasons.join("; "))
    }
}

fn write_human(rows: &[ShapeReport], cli: &Cli) -> Result<()> {
    if cli.out.is_some() {
        bail!("--out nécessite --format json|ndjson|csv");
    }
    for row in rows {
        println!("{}", human_line(row));
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[ShapeReport], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[ShapeReport], _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[ShapeReport], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[ShapeReport], _: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[ShapeReport], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner().context("vidage du tampon csv")?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[ShapeReport], _: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 7] = ["original", "local", "domain", "shape", "valid", "failures", "reasons"];

#[cfg(feature = "with-csv")]
fn csv_record(row: &ShapeReport) -> [String; 7] {
    use mailshape::DomainShape;

    let shape = match row.shape {
        Some(DomainShape::DnsName) => "dns_name",
        Some(DomainShape::Ipv4Literal) => "ipv4_literal",
        Some(DomainShape::Ipv6Literal) => "ipv6_literal",
        None => "",
    };
    let failures = row
        .failures
        .iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<_>>()
        .join("|");
    [
        row.original.clone(),
        row.local.clone().unwrap_or_default(),
        row.domain.clone().unwrap_or_default(),
        shape.to_string(),
        row.valid.to_string(),
        failures,
        row.reasons.join("|"),
    ]
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("création de {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailshape::check_shape;

    #[test]
    fn human_lines() {
        insta::assert_snapshot!(human_line(&check_shape("simple@example.com")), @"[OK]    simple@example.com");
        insta::assert_snapshot!(
            human_line(&check_shape("too.few.octets@[1.2.3]")),
            @"[INVALID] too.few.octets@[1.2.3] :: IPv4 literal has 3 fields, expected 4"
        );
    }

    #[test]
    fn any_invalid_flags_mixed_batches() {
        let rows = vec![check_shape("a@example.com"), check_shape("nope")];
        assert!(any_invalid(&rows));
        assert!(!any_invalid(&rows[..1]));
    }

    #[cfg(feature = "with-csv")]
    #[test]
    fn csv_record_columns() {
        let record = csv_record(&check_shape("a b@[1.2.3.4]"));
        assert_eq!(record[3], "ipv4_literal");
        assert_eq!(record[4], "false");
        assert_eq!(record[5], "local part is invalid");
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn json_uses_snake_case_kinds() {
        let json = serde_json::to_string(&check_shape("nope")).expect("serialize");
        assert!(json.contains("\"failures\":[\"no_separator\"]"), "{json}");
    }
}
