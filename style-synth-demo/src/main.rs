use std::{fs, path::PathBuf};

use clap::Parser;
use serde_json::Map;
use style_synth::{
    error::Result,
    generator::layers::DATA_LAYER_PREFIX,
    map::{LayerType, MapDefinition},
    style::{
        expression::{evaluate_number, EvalContext},
        paint::opacity_property,
        Style,
    },
    StyleGenerator, SynthesisSettings,
};

/// Synthesizes a map style from a base style and a thematic map definition.
#[derive(Parser, Debug)]
#[command(name = "style-synth", version)]
struct Cli {
    /// Base style JSON with `metadata.insertionPoints`
    #[arg(long)]
    base_style: PathBuf,

    /// Map definition JSON
    #[arg(long)]
    map: PathBuf,

    /// Prefix for relative source URLs, used verbatim
    #[arg(long, default_value = "")]
    base_url: String,

    /// JSON file overriding synthesis settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Where to write the style. Defaults to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long)]
    fade_in_span: Option<f64>,

    #[arg(long)]
    min_radius: Option<f64>,

    #[arg(long)]
    max_radius: Option<f64>,

    /// Log the opacity of every generated data layer at this zoom
    #[arg(long)]
    preview_zoom: Option<f64>,
}

impl Cli {
    fn synthesis_settings(&self) -> Result<SynthesisSettings> {
        let mut settings = match &self.settings {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => SynthesisSettings::default(),
        };

        if let Some(span) = self.fade_in_span {
            settings.fade_in_span = span;
        }
        if let Some(radius) = self.min_radius {
            settings.min_point_radius = radius;
        }
        if let Some(radius) = self.max_radius {
            settings.max_point_radius = radius;
        }
        Ok(settings)
    }
}

fn preview(style: &Style, zoom: f64) {
    let properties = Map::new();
    let ctx = EvalContext::new(zoom, &properties);

    for layer in style
        .layers
        .iter()
        .filter(|layer| layer.id.starts_with(DATA_LAYER_PREFIX))
    {
        let Ok(layer_type) = layer.type_.parse::<LayerType>() else {
            continue;
        };
        let opacity = layer
            .paint_property(opacity_property(layer_type))
            .and_then(|expr| evaluate_number(expr, &ctx));
        match opacity {
            Some(opacity) => log::info!("{} opacity at zoom {}: {}", layer.id, zoom, opacity),
            None => log::warn!("{} has no evaluable opacity", layer.id),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = cli.synthesis_settings()?;
    let base = Style::load(&cli.base_style)?;
    let map = MapDefinition::load(&cli.map)?;

    log::info!(
        "generating style from {} with {} map layers",
        base.basemap_name(),
        map.layers.len()
    );
    let style = StyleGenerator::with_settings(settings).generate(base, &map, &cli.base_url)?;

    if let Some(zoom) = cli.preview_zoom {
        preview(&style, zoom);
    }

    let json = style.to_json_string_pretty()?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json)?;
            log::info!("style written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run(Cli::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
