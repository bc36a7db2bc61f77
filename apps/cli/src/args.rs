//! # CLI Argument Definitions
//!
//! Subcommands address one family at a time. Codes are either bare (`4326`, read in the
//! default authority) or qualified (`EPSG:4326`, `EPSG::4326`).

use clap::{ArgAction, Parser, Subcommand};
use georef::domain::Family;
use georef::domain::config::ReferenceConfig;
use std::path::PathBuf;

/// Query geodetic reference objects from a delimited dataset.
#[derive(Debug, Parser)]
#[command(name = "georef")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file (`georef.toml` in the working directory when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset root, overriding `dataset.root`
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Default authority, overriding `registry.default_authority`
    #[arg(short, long, global = true)]
    pub authority: Option<String>,

    /// Print objects as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up one object by code
    Lookup {
        /// Family name, e.g. `ellipsoid`, `datum`, `crs`
        family: Family,
        code: String,
    },
    /// Look up one object by name or alias; the lowest code wins
    Find { family: Family, name: String },
    /// List every object of a family in the default authority
    List { family: Family },
    /// Look up a coordinate reference system of any kind
    Crs { code: String },
    /// Show what a projected system hands to coordinate transformations
    Inputs { code: String },
    /// Load whole families and report how many objects they hold
    Warm {
        /// Families to load; every family when omitted
        families: Vec<Family>,
    },
}

impl Cli {
    /// Applies the command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut ReferenceConfig) {
        if let Some(root) = &self.data {
            config.dataset.root.clone_from(root);
        }
        if let Some(authority) = &self.authority {
            config.registry.default_authority.clone_from(authority);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_parse_by_alias() {
        let cli = Cli::try_parse_from(["georef", "lookup", "datum", "6326"]).unwrap();
        assert!(matches!(cli.command, Command::Lookup { family: Family::GeodeticDatum, .. }));

        let cli = Cli::try_parse_from(["georef", "list", "CRS", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::List { family: Family::CoordinateReferenceSystem }));
    }

    #[test]
    fn unknown_family_is_rejected() {
        assert!(Cli::try_parse_from(["georef", "lookup", "spheroid", "7030"]).is_err());
    }

    #[test]
    fn overrides_replace_configured_values() {
        let cli = Cli::try_parse_from(["georef", "-vv", "--data", "/srv/epsg", "-a", "esri", "crs", "4326"]).unwrap();
        let mut config = ReferenceConfig::default();

        cli.apply(&mut config);

        assert_eq!(cli.verbose, 2);
        assert_eq!(config.dataset.root, PathBuf::from("/srv/epsg"));
        assert_eq!(config.registry.default_authority, "esri");
    }
}
