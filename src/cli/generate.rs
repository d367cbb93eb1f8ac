//! Generate command implementation.
//!
//! Loads a skin package, colours each part from its mask and colour matrix,
//! stamps the decal and writes the result as PNG.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Args;
use image::DynamicImage;

use crate::discovery::{Config, LoadedPart, OutputName, SkinDirectory, TextureIssue};
use crate::error::{Result, SkinError};
use crate::output::{display_path, plural, Printer};
use crate::parser::{parse_decalspec, validate_decalspec};
use crate::render::{palette_image, render_part, write_png, DecalLayer, PartRender, WriteOutcome};
use crate::types::{BlendMode, Colour, PartKind, DIFFUSE_PARAM, MASK_PARAM};

/// Generate head and body textures from a skin package
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Skin package directory (defaults to the current directory)
    pub input: Option<PathBuf>,

    /// Output directory (defaults to the current directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output file name format, e.g. "{class_}_{skin}_{part}"
    #[arg(long)]
    pub outname: Option<String>,

    /// Decal placement: PosX[%] PosY[%] Rot Scale0[%] [Scale1[%]] [y|n]
    #[arg(long, allow_hyphen_values = true)]
    pub decalspec: Option<String>,

    /// Blend mode for the final composite
    #[arg(long, value_enum)]
    pub blend: Option<BlendMode>,

    /// Keep near-white colours instead of making them transparent
    #[arg(long)]
    pub keep_white: bool,

    /// Skip the head texture
    #[arg(long)]
    pub exclude_head: bool,

    /// Skip the body texture
    #[arg(long)]
    pub exclude_body: bool,

    /// Also write the colour palette of each part
    #[arg(long)]
    pub palette: bool,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,

    /// Hex colour replacing the decal tint from the props file
    #[arg(long)]
    pub decal_color: Option<String>,

    /// Config file (defaults to ./skingen.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Generation settings after merging config and flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub output: PathBuf,
    pub outname: OutputName,
    pub decalspec: Option<String>,
    pub blend: BlendMode,
    pub keep_white: bool,
    pub parts: Vec<PartKind>,
    pub palette: bool,
    pub force: bool,
    pub decal_colour: Option<Colour>,
}

impl Settings {
    /// Merge flags over config values.
    pub fn resolve(args: &GenerateArgs, config: &Config, cwd: &Path) -> Result<Self> {
        let outname = match args.outname.as_ref().or(config.outname.as_ref()) {
            Some(format) => OutputName::parse(format)?,
            None => OutputName::default(),
        };
        let decal_colour = match &args.decal_color {
            Some(hex) => Some(Colour::from_hex(hex)?),
            None => config.decal_colour()?,
        };

        let exclude_head = args.exclude_head || config.exclude_head;
        let exclude_body = args.exclude_body || config.exclude_body;
        let parts = PartKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                PartKind::Head => !exclude_head,
                PartKind::Body => !exclude_body,
            })
            .collect();

        Ok(Self {
            output: args
                .output
                .clone()
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| cwd.to_path_buf()),
            outname,
            decalspec: args.decalspec.clone().or_else(|| config.decalspec.clone()),
            blend: args.blend.or(config.blend).unwrap_or_default(),
            keep_white: args.keep_white || config.keep_white,
            parts,
            palette: args.palette || config.palette,
            force: args.force || config.force,
            decal_colour,
        })
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let summary = generate(&args, printer)?;
    if summary.failed > 0 {
        return Err(SkinError::Build {
            message: format!("{} could not be generated", plural(summary.failed, "part", "parts")),
            help: Some("Run `skingen check` for details".to_string()),
        });
    }
    Ok(())
}

/// Run the generator and report what was written.
pub fn generate(args: &GenerateArgs, printer: &Printer) -> Result<Summary> {
    let cwd = std::env::current_dir()?;
    let config = match Config::discover(args.config.as_deref(), &cwd)? {
        Some((path, config)) => {
            printer.debug("Config", &display_path(&path));
            config
        }
        None => Config::default(),
    };
    let mut settings = Settings::resolve(args, &config, &cwd)?;

    let input = args.input.clone().unwrap_or_else(|| cwd.clone());
    let skin = SkinDirectory::open(&input)?;
    printer.status(
        "Loading",
        &format!(
            "{} skin {} ({})",
            skin.info.class,
            printer.bold(&skin.info.skin),
            display_path(&skin.root)
        ),
    );

    if let Some(spec) = &settings.decalspec {
        if !validate_decalspec(spec) {
            printer.warning("Ignoring", &format!("invalid decalspec '{}'", spec));
            settings.decalspec = None;
        }
    }

    let now = Local::now();
    let mut summary = Summary::default();

    for &kind in &settings.parts {
        match generate_part(&skin, kind, &settings, &now, printer) {
            Ok(outcomes) => {
                for outcome in outcomes {
                    match outcome {
                        WriteOutcome::Written => summary.written += 1,
                        WriteOutcome::Skipped => summary.skipped += 1,
                    }
                }
            }
            Err(e) => {
                printer.error("Failed", &format!("{}: {}", kind, e));
                summary.failed += 1;
            }
        }
    }

    printer.success(
        "Finished",
        &format!(
            "{} to {}{}",
            plural(summary.written, "texture", "textures"),
            display_path(&settings.output),
            if summary.skipped > 0 {
                printer.dim(&format!(" ({} skipped)", summary.skipped))
            } else {
                String::new()
            }
        ),
    );

    Ok(summary)
}

/// Render one part and write it, plus its palette when asked.
fn generate_part(
    skin: &SkinDirectory,
    kind: PartKind,
    settings: &Settings,
    now: &DateTime<Local>,
    printer: &Printer,
) -> Result<Vec<WriteOutcome>> {
    let loaded = skin.load_part(kind)?;
    printer.debug("Props", &display_path(&loaded.part.props_path));
    for warning in &loaded.warnings {
        printer.warning("Skipped", &format!("{}: {}", kind, warning));
    }

    let diffuse_path = required_texture(&loaded, DIFFUSE_PARAM, "diffuse texture")?;
    let mask_path = required_texture(&loaded, MASK_PARAM, "mask texture")?;
    let part = &loaded.part;

    let matrix = part.color_matrix(settings.keep_white)?;
    for line in matrix.to_string().lines() {
        printer.debug("Colours", &format!("{}: {}", kind, line));
    }

    let mut outcomes = Vec::new();
    if settings.palette {
        let palette = DynamicImage::ImageRgba8(palette_image(&matrix));
        let part_name = format!("palette_{}", kind);
        outcomes.push(write_output(&palette, skin, &part_name, settings, now, printer)?);
    }

    printer.status("Generating", &format!("{} from {}", kind, display_path(&diffuse_path)));
    let diffuse = open_image(&diffuse_path)?;
    let mask = open_image(&mask_path)?.to_rgba8();

    let decal_image = match (&part.textures.decal, &settings.decalspec) {
        (Some(path), Some(_)) => match open_image(path) {
            Ok(image) => Some(image.to_rgba8()),
            Err(e) => {
                printer.warning("Skipping", &format!("{} decal: {}", kind, e));
                None
            }
        },
        (Some(_), None) => {
            printer.warning("Skipping", &format!("{} decal: no decalspec given", kind));
            None
        }
        _ => None,
    };

    let decal = match (&decal_image, &settings.decalspec) {
        (Some(image), Some(spec)) => {
            let spec = parse_decalspec(spec, diffuse.width(), diffuse.height())?;
            printer.debug("Decal", &format!("{}: {}", kind, spec));
            Some(DecalLayer {
                image,
                tint: match settings.decal_colour {
                    Some(colour) => colour,
                    None => part.decal_colour()?,
                },
                area: part.decal_area()?,
                spec,
            })
        }
        _ => None,
    };

    let render = PartRender {
        matrix: &matrix,
        decal,
        blend: settings.blend,
    };
    let output = render_part(&diffuse, &mask, &render)?;
    outcomes.push(write_output(&output, skin, kind.lower(), settings, now, printer)?);

    Ok(outcomes)
}

/// Resolved path of a texture the part cannot do without.
fn required_texture(loaded: &LoadedPart, param: &str, what: &str) -> Result<PathBuf> {
    let Some(slot) = loaded.part.textures.slot(param) else {
        return Err(SkinError::Build {
            message: format!("'{}' is not a texture parameter skingen reads", param),
            help: None,
        });
    };
    if let Some(path) = slot {
        return Ok(path.clone());
    }

    let path = loaded
        .texture_issues
        .iter()
        .find_map(|issue| match issue {
            TextureIssue::Missing { param: p, expected } if p == param => Some(expected.clone()),
            _ => None,
        })
        .unwrap_or_else(|| loaded.part.props_path.clone());
    Err(SkinError::MissingAsset {
        what: format!("{} {} ({})", loaded.part.kind, what, param),
        path,
    })
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| SkinError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read image: {}", e),
    })
}

fn write_output(
    image: &DynamicImage,
    skin: &SkinDirectory,
    part: &str,
    settings: &Settings,
    now: &DateTime<Local>,
    printer: &Printer,
) -> Result<WriteOutcome> {
    let path = settings
        .output
        .join(settings.outname.file_name(&skin.info, part, now));
    let outcome = write_png(image, &path, settings.force)?;
    match outcome {
        WriteOutcome::Written => printer.success("Wrote", &display_path(&path)),
        WriteOutcome::Skipped => printer.warning(
            "Skipped",
            &format!("{} already exists (use --force to overwrite)", display_path(&path)),
        ),
    }
    Ok(outcome)
}
