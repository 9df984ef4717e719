//! Keyframed channels that share one set of keys.

use glam::DVec3;
use indexmap::IndexMap;
use solvere_core::{AxisAngle, ColorRgb, TransformError};

use crate::resample::Resampler;

/// What a channel animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelKind {
    Translation,
    Orientation,
    Color,
    Scale,
}

impl ChannelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::Translation => "translation",
            ChannelKind::Orientation => "orientation",
            ChannelKind::Color => "color",
            ChannelKind::Scale => "scale",
        }
    }
}

/// Typed per-key values of one channel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelValues {
    Translation(Vec<DVec3>),
    Orientation(Vec<AxisAngle>),
    Color(Vec<ColorRgb>),
    Scale(Vec<DVec3>),
}

impl ChannelValues {
    pub fn kind(&self) -> ChannelKind {
        match self {
            ChannelValues::Translation(_) => ChannelKind::Translation,
            ChannelValues::Orientation(_) => ChannelKind::Orientation,
            ChannelValues::Color(_) => ChannelKind::Color,
            ChannelValues::Scale(_) => ChannelKind::Scale,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChannelValues::Translation(v) | ChannelValues::Scale(v) => v.len(),
            ChannelValues::Orientation(v) => v.len(),
            ChannelValues::Color(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The animated channels of one entity.
///
/// Every channel holds exactly one value per key; [`ChannelSet::insert`]
/// rejects anything else.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelSet {
    keys: Vec<f64>,
    channels: IndexMap<ChannelKind, ChannelValues>,
}

impl ChannelSet {
    /// An empty set over the given keys.
    pub fn new(keys: Vec<f64>) -> Self {
        Self {
            keys,
            channels: IndexMap::new(),
        }
    }

    /// An empty set over the evenly spaced keys of a resampler.
    pub fn from_resampler(resampler: &Resampler) -> Self {
        Self::new(resampler.keys())
    }

    /// Add or replace a channel.
    pub fn insert(&mut self, values: ChannelValues) -> Result<(), TransformError> {
        if values.len() != self.keys.len() {
            return Err(TransformError::LengthMismatch {
                expected: self.keys.len(),
                found: values.len(),
            });
        }
        self.channels.insert(values.kind(), values);
        Ok(())
    }

    /// Builder form of [`ChannelSet::insert`].
    pub fn with(mut self, values: ChannelValues) -> Result<Self, TransformError> {
        self.insert(values)?;
        Ok(self)
    }

    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn get(&self, kind: ChannelKind) -> Option<&ChannelValues> {
        self.channels.get(&kind)
    }

    pub fn contains(&self, kind: ChannelKind) -> bool {
        self.channels.contains_key(&kind)
    }

    pub fn translation(&self) -> Option<&[DVec3]> {
        match self.get(ChannelKind::Translation)? {
            ChannelValues::Translation(v) => Some(v),
            _ => None,
        }
    }

    pub fn orientation(&self) -> Option<&[AxisAngle]> {
        match self.get(ChannelKind::Orientation)? {
            ChannelValues::Orientation(v) => Some(v),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<&[ColorRgb]> {
        match self.get(ChannelKind::Color)? {
            ChannelValues::Color(v) => Some(v),
            _ => None,
        }
    }

    pub fn scale(&self) -> Option<&[DVec3]> {
        match self.get(ChannelKind::Scale)? {
            ChannelValues::Scale(v) => Some(v),
            _ => None,
        }
    }

    /// Channels in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelValues> {
        self.channels.values()
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True when no channel has been added.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
