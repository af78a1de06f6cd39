use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use std::{fs::{self, File}, io::Write, path::{Path, PathBuf}};

/// Writes one numbered devlog file per solver run and optionally echoes it to
/// the console.
pub struct DevLogger {
    dir: Option<PathBuf>,
    echo: bool,
    color: bool,
    step: bool,
    max_logs: usize,
    counter: usize,
}

impl DevLogger {
    pub fn new(dir: impl Into<PathBuf>, color: bool, step: bool, max_logs: usize) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("creating devlog dir {}", dir.display()))?;
        Ok(Self { dir: Some(dir), echo: true, color, step, max_logs, counter: 0 })
    }

    /// Discards everything.
    pub fn disabled() -> Self { Self { dir: None, echo: false, color: false, step: false, max_logs: 0, counter: 0 } }

    /// Echo to stdout without writing files.
    pub fn console(color: bool, step: bool) -> Self { Self { dir: None, echo: true, color, step, max_logs: 0, counter: 0 } }

    pub fn quiet(mut self) -> Self { self.echo = false; self }

    /// Files only when a directory is given, console only when stepping
    /// without one. Stepping always echoes so there is something to step through.
    pub fn for_cli(dir: Option<&Path>, color: bool, step: bool, max_logs: usize) -> Result<Self> {
        match dir {
            Some(dir) if step => Self::new(dir, color, true, max_logs),
            Some(dir) => Ok(Self::new(dir, color, false, max_logs)?.quiet()),
            None if step => Ok(Self::console(color, true)),
            None => Ok(Self::disabled()),
        }
    }

    pub fn echoes(&self) -> bool { self.echo }

    pub fn written(&self) -> usize { self.counter }

    pub fn log(&mut self, title: &str, details: &str) -> Result<()> {
        if self.dir.is_none() && !self.echo { return Ok(()); }
        if self.max_logs != 0 && self.counter >= self.max_logs { return Ok(()); }
        self.counter += 1;

        if let Some(dir) = &self.dir {
            let path = dir.join(format!("devlog({}).txt", self.counter));
            let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut f = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            writeln!(f, "[{}] {}\n\n{}", ts, title, details)?;
        }

        if self.echo {
            if self.color {
                println!("{} {}\n{}", "➤".blue().bold(), title.bold(), details);
            } else {
                println!("➤ {}\n{}", title, details);
            }
        }

        if self.step {
            print!("-- press Enter to continue --");
            use std::io::{self, Write as _};
            io::stdout().flush().ok();
            let mut s = String::new();
            io::stdin().read_line(&mut s).ok();
        }
        Ok(())
    }
}
