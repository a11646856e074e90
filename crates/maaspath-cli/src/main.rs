use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use maaspath::{DataRoots, InstallKind, RootKind};
use serde::Serialize;
use tracing::{debug, error};

mod cli;

use crate::cli::Cli;

/// One resolved path, as printed with `--json`.
#[derive(Debug, Serialize)]
struct Resolution<'a> {
    kind: RootKind,
    install: InstallKind,
    root: PathBuf,
    path: &'a Path,
    resolved: PathBuf,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("maas-data-path: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("maaspath=warn,maas_data_path=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let roots = cli.roots(DataRoots::from_env());
    for kind in RootKind::ALL {
        if let Some(dir) = roots.override_for(kind) {
            debug!("{} override set to {:?}", kind, dir);
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rejected = 0usize;

    for path in &cli.paths {
        match resolve(&roots, cli.kind(), path, cli.strict) {
            Ok(resolution) => {
                let line = render(&resolution, cli.json)?;
                writeln!(out, "{line}").context("writing to stdout")?;
            }
            Err(e) => {
                error!("{e}");
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        anyhow::bail!("{rejected} of {} path(s) rejected", cli.paths.len());
    }
    Ok(())
}

fn resolve<'a>(
    roots: &DataRoots,
    kind: RootKind,
    path: &'a Path,
    strict: bool,
) -> maaspath::Result<Resolution<'a>> {
    let resolved = if strict {
        roots.resolve_within(kind, path)?
    } else {
        roots.resolve(kind, path)
    };
    Ok(Resolution {
        kind,
        install: roots.install_kind(),
        root: roots.root(kind),
        path,
        resolved,
    })
}

fn render(resolution: &Resolution<'_>, json: bool) -> anyhow::Result<String> {
    if json {
        serde_json::to_string(resolution).context("encoding resolution as JSON")
    } else {
        Ok(resolution.resolved.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain() {
        let roots = DataRoots::new();
        let r = resolve(&roots, RootKind::SnapData, Path::new("secrets"), false).unwrap();
        assert_eq!(render(&r, false).unwrap(), "/var/lib/maas/secrets");
        assert_eq!(r.install, InstallKind::Deb);
    }

    #[test]
    fn test_resolve_json() {
        let roots = DataRoots::new().with_snap_data("/snap/maas/current/data/");
        let r = resolve(&roots, RootKind::SnapData, Path::new("secrets"), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render(&r, true).unwrap()).unwrap();
        assert_eq!(value["kind"], "snap_data");
        assert_eq!(value["install"], "snap");
        assert_eq!(value["root"], "/snap/maas/current/data");
        assert_eq!(value["path"], "secrets");
        assert_eq!(value["resolved"], "/snap/maas/current/data/secrets");
    }

    #[test]
    fn test_strict_rejects_escape() {
        let roots = DataRoots::new();
        assert!(resolve(&roots, RootKind::MaasData, Path::new("../etc"), true).is_err());
        assert!(resolve(&roots, RootKind::MaasData, Path::new("/etc"), true).is_err());
        // permissive mode still resolves
        let r = resolve(&roots, RootKind::MaasData, Path::new("/etc"), false).unwrap();
        assert_eq!(r.resolved, PathBuf::from("/var/lib/maas/etc"));
    }
}
