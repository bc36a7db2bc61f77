use crate::args::{Cli, Command};
use anyhow::{Context, anyhow};
use georef::domain::{Authority, FamilySet, IdentifiedObject, ProjectionInputs, ReferenceKey};
use georef::{ReferenceContext, ReferenceObject};
use serde::Serialize;
use std::io::Write;
use tracing::warn;

/// Runs one parsed command against `context`, writing results to `out`.
///
/// # Errors
/// Registry failures (missing objects, unreadable datasets, malformed rows under the abort
/// policy) and write failures on `out`.
pub fn run(cli: &Cli, context: &ReferenceContext, out: &mut dyn Write) -> anyhow::Result<()> {
    let authority = &context.options().default_authority;

    match &cli.command {
        Command::Lookup { family, code } => {
            let key = parse_key(code, authority)?;
            let object = context.lookup(*family, key.authority.as_str(), key.code)?;
            write_object(out, cli.json, &object)?;
        },
        Command::Find { family, name } => {
            let object = context.lookup_by_name(*family, name)?;
            write_object(out, cli.json, &object)?;
        },
        Command::List { family } => {
            let objects = context.list(*family, authority.as_str())?;
            if cli.json {
                write_json(out, &objects)?;
            } else {
                for object in &objects {
                    writeln!(out, "{}", summary(object))?;
                }
            }
        },
        Command::Crs { code } => {
            let key = parse_key(code, authority)?;
            let object = ReferenceObject::from(context.crs_key(&key)?);
            write_object(out, cli.json, &object)?;
        },
        Command::Inputs { code } => {
            let key = parse_key(code, authority)?;
            let inputs = context.projection_inputs(key.authority.as_str(), key.code)?;
            if cli.json {
                write_json(out, &inputs)?;
            } else {
                write_inputs(out, &inputs)?;
            }
        },
        Command::Warm { families } => {
            let set = if families.is_empty() { FamilySet::ALL } else { families.iter().copied().collect() };
            let count = context.warm(set)?;
            writeln!(out, "Loaded {count} objects")?;
        },
    }

    for diagnostic in context.diagnostics() {
        warn!(%diagnostic, "Skipped malformed row");
    }
    Ok(())
}

fn parse_key(text: &str, authority: &Authority) -> anyhow::Result<ReferenceKey> {
    ReferenceKey::parse(text, authority).ok_or_else(|| anyhow!("'{text}' is neither a code nor AUTHORITY:CODE"))
}

fn summary(object: &ReferenceObject) -> String {
    format!("{}\t{}\t{}", object.key(), object.family(), object.name())
}

fn write_object(out: &mut dyn Write, json: bool, object: &ReferenceObject) -> anyhow::Result<()> {
    if json {
        return write_json(out, object);
    }

    writeln!(out, "{}", summary(object))?;
    if !object.aliases().is_empty() {
        writeln!(out, "  aliases: {}", object.aliases().join(", "))?;
    }
    if let Some(remarks) = object.remarks() {
        writeln!(out, "  remarks: {remarks}")?;
    }
    Ok(())
}

fn write_inputs(out: &mut dyn Write, inputs: &ProjectionInputs) -> anyhow::Result<()> {
    writeln!(out, "ellipsoid\t{}\t{}", inputs.ellipsoid.key(), inputs.ellipsoid.name())?;
    writeln!(out, "prime meridian\t{}\t{}", inputs.prime_meridian.key(), inputs.prime_meridian.name())?;
    writeln!(out, "projection\t{}\t{}", inputs.projection.key(), inputs.projection.method)?;
    for parameter in &inputs.projection.parameters {
        let unit = parameter.unit.as_ref().map_or("", |unit| unit.name());
        writeln!(out, "  {}\t{} {unit}", parameter.name, parameter.value)?;
    }
    writeln!(out, "area of use\t{}\t{}", inputs.area_of_use.key(), inputs.area_of_use.name())?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Serialising output")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use georef::dataset::MemoryDataset;
    use std::sync::Arc;

    fn context() -> ReferenceContext {
        let dataset = MemoryDataset::builder()
            .resource("EPSG", "UnitOfMeasure", "9001;metre;length;1;1;SI unit.\n9002;foot;length;0.3048;1;\n")
            .resource("EPSG", "Alias", "Unit of Measure;9001;meter\n")
            .build();
        ReferenceContext::builder().dataset(Arc::new(dataset)).build()
    }

    fn output(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(&cli, &context(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn lookup_prints_identity_details() {
        let text = output(&["georef", "lookup", "unit", "EPSG:9001"]).unwrap();
        assert_eq!(text, "EPSG::9001\tunit-of-measure\tmetre\n  aliases: meter\n  remarks: SI unit.\n");
    }

    #[test]
    fn list_prints_one_line_per_object() {
        let text = output(&["georef", "list", "unit"]).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("EPSG::9002\tunit-of-measure\tfoot\n"));
    }

    #[test]
    fn json_output_is_the_serialised_object() {
        let text = output(&["georef", "--json", "find", "unit", "meter"]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["code"], 9001);
        assert_eq!(json["factor"], 1.0);
    }

    #[test]
    fn garbage_codes_are_rejected() {
        let err = output(&["georef", "lookup", "unit", "metre"]).unwrap_err();
        assert!(err.to_string().contains("neither a code"));
    }
}
