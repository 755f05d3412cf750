//! Builders for the data and label layers of a map layer.

use serde_json::{json, Value};

use crate::{
    error::Result,
    generator::ramp::{color_ramp, opacity_fade_in, radius_ramp},
    map::{Dataset, LayerType, MapLayer},
    settings::SynthesisSettings,
    style::{
        layer::StyleLayer,
        paint::{CirclePaint, FillPaint, LayerPaint, LinePaint, StyleProperty},
        LabelLayerStyle,
    },
};

pub const DATA_LAYER_PREFIX: &str = "datalayer-";
pub const LABEL_LAYER_PREFIX: &str = "labellayer-";

pub fn data_layer_id(layer: &MapLayer) -> String {
    format!("{}{}", DATA_LAYER_PREFIX, layer.layer_id)
}

pub fn label_layer_id(layer: &MapLayer) -> String {
    format!("{}{}", LABEL_LAYER_PREFIX, layer.layer_id)
}

fn has_attribute_filter(layer: &MapLayer) -> Value {
    json!(["has", layer.dataset_attribute])
}

pub fn paint_for_layer(
    layer: &MapLayer,
    dataset: &Dataset,
    settings: &SynthesisSettings,
) -> Result<LayerPaint> {
    let opacity = opacity_fade_in(layer, dataset, settings);

    let paint = match layer.layer_type {
        LayerType::Fill => LayerPaint::Fill(FillPaint {
            fill_color: color_ramp(layer, dataset, settings)?,
            fill_outline_color: StyleProperty::Constant(settings.outline_color.clone()),
            fill_opacity: opacity,
        }),
        LayerType::Circle => LayerPaint::Circle(CirclePaint {
            circle_color: color_ramp(layer, dataset, settings)?,
            circle_radius: radius_ramp(layer, dataset, settings)?,
            circle_opacity: opacity,
        }),
        LayerType::Line => LayerPaint::Line(LinePaint {
            line_color: color_ramp(layer, dataset, settings)?,
            line_width: StyleProperty::Function(settings.line_width.clone()),
            line_opacity: opacity,
        }),
    };
    Ok(paint)
}

/// Builds the layer which visualizes `layer`'s attribute.
pub fn generate_data_layer(
    layer: &MapLayer,
    dataset: &Dataset,
    settings: &SynthesisSettings,
) -> Result<StyleLayer> {
    dataset.validate()?;
    let paint = paint_for_layer(layer, dataset, settings)?;

    Ok(StyleLayer {
        id: data_layer_id(layer),
        type_: paint.layer_type().to_string(),
        source: Some(layer.dataset_id.clone()),
        source_layer: Some(settings.source_layer.clone()),
        minzoom: Some(dataset.min_zoom),
        maxzoom: Some(dataset.max_zoom),
        filter: Some(has_attribute_filter(layer)),
        paint: Some(paint.into_map()?),
        ..StyleLayer::default()
    })
}

/// Builds the symbol layer labelling `layer`, if it has a label attribute.
///
/// The template's layout and paint are copied, never modified.
pub fn generate_label_layer(
    layer: &MapLayer,
    template: &LabelLayerStyle,
    settings: &SynthesisSettings,
) -> Option<StyleLayer> {
    let label_attribute = layer.label_attribute.as_ref()?;

    let mut layout = template.layout.clone();
    layout.insert(
        "text-field".to_string(),
        Value::from(format!("{{{}}}", label_attribute)),
    );

    match layer.layer_type {
        // TODO: derive the offset from the circle radius once array valued expressions work
        LayerType::Circle => {
            layout.insert("text-offset".to_string(), json!(settings.label_text_offset));
        }
        LayerType::Line => {
            layout.insert("symbol-placement".to_string(), json!("line"));
        }
        LayerType::Fill => {}
    }

    Some(StyleLayer {
        id: label_layer_id(layer),
        type_: "symbol".to_string(),
        source: Some(layer.dataset_id.clone()),
        source_layer: Some(settings.source_layer.clone()),
        filter: Some(has_attribute_filter(layer)),
        layout: Some(layout),
        paint: Some(template.paint.clone()),
        ..StyleLayer::default()
    })
}
