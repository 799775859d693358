//! Development tasks: shell completions and man pages for `readable`.
//!
//! ```text
//! cargo xtask completions [--out-dir target/completions]
//! cargo xtask man [--out-dir target/man]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for readable")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
        /// Shells to generate for (default: all)
        #[arg(long, value_enum, value_delimiter = ',')]
        shell: Vec<Shell>,
    },
    /// Generate man pages for the command and every subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Completions { out_dir, shell } => {
            let shells = if shell.is_empty() {
                Shell::value_variants().to_vec()
            } else {
                shell
            };
            completions(&out_dir, &shells)
        }
        Task::Man { out_dir } => man_pages(&out_dir),
    }
}

fn completions(out_dir: &Path, shells: &[Shell]) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = readable::command();
    let name = cmd.get_name().to_string();
    for &shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, &name, out_dir)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn man_pages(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = readable::command();
    clap_mangen::generate_to(cmd, out_dir)?;
    println!("wrote man pages to {}", out_dir.display());
    Ok(())
}
