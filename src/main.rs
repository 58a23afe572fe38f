use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use lectar::{
    catalog::{self, Catalog},
    naming,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rename id-scheme directories and files to catalog titles
    Rename {
        base: Option<String>,
        #[arg(long)]
        repo: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Restore title-scheme names back to catalog ids
    Restore {
        base: Option<String>,
        #[arg(long)]
        repo: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove @eaDir thumbnail caches and empty class directories
    Cleanup {
        base: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

fn resolve_dir(arg: Option<String>, var: &str) -> Result<PathBuf> {
    match arg {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => std::env::var(var)
            .map(PathBuf::from)
            .with_context(|| format!("Pass the directory or set {var}")),
    }
}

fn rename_to_titles(base: &Path, catalog: &Catalog, dry_run: bool) -> Result<()> {
    let classes = catalog.classes()?;

    for entry in WalkDir::new(base).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(dir_name) = entry.file_name().to_str() else {
            continue;
        };
        if !naming::is_catalog_id(dir_name) {
            continue;
        }
        let dir = entry.path();

        let Some(class) = catalog::class_by_id(&classes, dir_name) else {
            println!("{} no class record for {}", "skip".yellow(), dir.display());
            continue;
        };
        let lectures_path = catalog.lectures_path(dir_name);
        if !lectures_path.exists() {
            println!(
                "{} missing lecture list {}",
                "skip".yellow(),
                lectures_path.display()
            );
            continue;
        }
        let lectures = catalog.lectures(dir_name)?;
        let target = base.join(naming::sanitize(&class.title));

        for file in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let file = file?;
            if !file.file_type().is_file() {
                continue;
            }
            let Some(file_name) = file.file_name().to_str() else {
                continue;
            };
            let Some(media) = naming::parse_id_name(file_name) else {
                continue;
            };
            // The embedded lecture id is deliberately not trusted here; the
            // sequence number alone decides which record applies.
            let Some(lecture) = catalog::lecture_by_sn(&lectures, media.sn) else {
                println!(
                    "{} no lecture with sn {} for {}",
                    "skip".yellow(),
                    media.sn,
                    file.path().display()
                );
                continue;
            };
            let new_path = target.join(naming::media_file_name(
                media.sn,
                &naming::sanitize(&lecture.title),
                &media.ext,
            ));
            if !dry_run {
                fs::create_dir_all(&target)?;
                fs::rename(file.path(), &new_path)?;
            }
            println!(
                "{} {} -> {}",
                "rename".green(),
                file.path().display(),
                new_path.display()
            );
        }

        if !dry_run && fs::read_dir(dir)?.next().is_none() {
            fs::remove_dir(dir)?;
            println!("{} empty directory {}", "remove".red(), dir.display());
        }
    }

    Ok(())
}

fn restore_catalog_ids(base: &Path, catalog: &Catalog, dry_run: bool) -> Result<()> {
    let classes = catalog.classes()?;

    for entry in WalkDir::new(base).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(dir_name) = entry.file_name().to_str() else {
            continue;
        };
        let dir = entry.path();

        let Some(class_id) = catalog::class_id_by_title(&classes, dir_name) else {
            println!("{} no class id for {}", "skip".yellow(), dir.display());
            continue;
        };
        let lectures_path = catalog.lectures_path(class_id);
        if !lectures_path.exists() {
            println!(
                "{} missing lecture list {}",
                "skip".yellow(),
                lectures_path.display()
            );
            continue;
        }
        let lectures = catalog.lectures(class_id)?;
        let target = base.join(class_id);

        for file in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let file = file?;
            if !file.file_type().is_file() {
                continue;
            }
            let Some(file_name) = file.file_name().to_str() else {
                continue;
            };
            let Some(media) = naming::parse_title_name(file_name) else {
                continue;
            };
            let Some(lecture_id) =
                catalog::lecture_id_by_title_and_sn(&lectures, &media.token, media.sn)
            else {
                println!(
                    "{} no lecture id for {}",
                    "skip".yellow(),
                    file.path().display()
                );
                continue;
            };
            let new_path = target.join(naming::media_file_name(media.sn, lecture_id, &media.ext));
            if !dry_run {
                fs::create_dir_all(&target)?;
                fs::rename(file.path(), &new_path)?;
            }
            println!(
                "{} {} -> {}",
                "restore".green(),
                file.path().display(),
                new_path.display()
            );
        }

        if !dry_run && fs::read_dir(dir)?.next().is_none() {
            fs::remove_dir(dir)?;
            println!("{} empty directory {}", "remove".red(), dir.display());
        }
    }

    Ok(())
}

fn cleanup(base: &Path, dry_run: bool) -> Result<()> {
    for entry in WalkDir::new(base).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();

        // Thumbnail caches go first, even inside the repository directories.
        let thumbs = dir.join("@eaDir");
        if thumbs.exists() {
            if dry_run {
                println!("{} thumbnail cache {}", "remove".red(), thumbs.display());
            } else {
                match fs::remove_dir_all(&thumbs) {
                    Ok(()) => {
                        println!("{} thumbnail cache {}", "remove".red(), thumbs.display())
                    }
                    Err(err) => {
                        println!("{} remove {}: {err}", "failed".red(), thumbs.display())
                    }
                }
            }
        }

        if matches!(entry.file_name().to_str(), Some("_repo" | "@_repo")) {
            continue;
        }

        if fs::read_dir(dir)?.next().is_some() {
            continue;
        }
        if dry_run {
            println!("{} empty directory {}", "remove".red(), dir.display());
        } else {
            match fs::remove_dir(dir) {
                Ok(()) => println!("{} empty directory {}", "remove".red(), dir.display()),
                Err(err) => println!("{} remove {}: {err}", "failed".red(), dir.display()),
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    match args.command {
        Commands::Rename {
            base,
            repo,
            dry_run,
        } => {
            let base = resolve_dir(base, "LECTAR_BASE_DIR")?;
            let repo = resolve_dir(repo, "LECTAR_REPO_DIR")?;
            rename_to_titles(&base, &Catalog::new(&repo), dry_run)
        }
        Commands::Restore {
            base,
            repo,
            dry_run,
        } => {
            let base = resolve_dir(base, "LECTAR_BASE_DIR")?;
            let repo = resolve_dir(repo, "LECTAR_REPO_DIR")?;
            restore_catalog_ids(&base, &Catalog::new(&repo), dry_run)
        }
        Commands::Cleanup { base, dry_run } => {
            let base = resolve_dir(base, "LECTAR_BASE_DIR")?;
            cleanup(&base, dry_run)
        }
    }
}
