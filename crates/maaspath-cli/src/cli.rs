use std::path::PathBuf;

use clap::Parser;
use maaspath::{DataRoots, RootKind};

#[derive(Debug, Parser)]
#[command(
    name = "maas-data-path",
    about = "Print where MAAS keeps a data file on this install"
)]
pub(crate) struct Cli {
    /// Paths relative to the data root
    #[arg(required = true)]
    pub(crate) paths: Vec<PathBuf>,
    /// Resolve against MAAS_DATA instead of SNAP_DATA
    #[arg(long)]
    pub(crate) maas: bool,
    /// Use this SNAP_DATA instead of the environment's
    #[arg(long, default_value = "")]
    pub(crate) snap_data: String,
    /// Use this MAAS_DATA instead of the environment's
    #[arg(long, default_value = "")]
    pub(crate) maas_data: String,
    /// Refuse absolute paths and paths climbing out of the root
    #[arg(long)]
    pub(crate) strict: bool,
    /// Print one JSON object per path
    #[arg(long)]
    pub(crate) json: bool,
}

impl Cli {
    pub(crate) fn kind(&self) -> RootKind {
        if self.maas {
            RootKind::MaasData
        } else {
            RootKind::SnapData
        }
    }

    /// Layer the flag overrides on top of `env`. Blank flags leave the
    /// environment's value alone.
    pub(crate) fn roots(&self, env: DataRoots) -> DataRoots {
        let mut roots = env;
        if !self.snap_data.trim().is_empty() {
            roots = roots.with_snap_data(&self.snap_data);
        }
        if !self.maas_data.trim().is_empty() {
            roots = roots.with_maas_data(&self.maas_data);
        }
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["maas-data-path", "secrets"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("secrets")]);
        assert_eq!(cli.kind(), RootKind::SnapData);
        assert!(!cli.strict);
        assert!(!cli.json);
        assert_eq!(cli.roots(DataRoots::new()), DataRoots::new());
    }

    #[test]
    fn test_requires_a_path() {
        assert!(Cli::try_parse_from(["maas-data-path"]).is_err());
    }

    #[test]
    fn test_maas_flag() {
        let cli = Cli::try_parse_from(["maas-data-path", "--maas", "a", "b"]).unwrap();
        assert_eq!(cli.kind(), RootKind::MaasData);
        assert_eq!(cli.paths.len(), 2);
    }

    #[test]
    fn test_flag_beats_environment() {
        let cli = Cli::try_parse_from([
            "maas-data-path",
            "--snap-data",
            "/snap/maas/x1/data",
            "secrets",
        ])
        .unwrap();
        let env = DataRoots::new()
            .with_snap_data("/snap/maas/current/data")
            .with_maas_data("/custom");
        let roots = cli.roots(env);
        assert_eq!(
            roots.data_path("secrets"),
            PathBuf::from("/snap/maas/x1/data/secrets")
        );
        assert_eq!(roots.maas_data_path("a"), PathBuf::from("/custom/a"));
    }

    #[test]
    fn test_blank_flag_keeps_environment() {
        let cli =
            Cli::try_parse_from(["maas-data-path", "--maas-data", "  ", "secrets"]).unwrap();
        let env = DataRoots::new().with_maas_data("/custom");
        assert_eq!(cli.roots(env.clone()), env);
    }
}
