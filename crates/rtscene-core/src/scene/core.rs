//! Scene container and item registry
//!
//! Names are unique across transmitters, receivers and RIS. Items keep the
//! order in which they were added, which is also the order of the
//! transmitter and receiver axes of computed channels.

use log::debug;

use super::SceneError;
use crate::antenna::AntennaArray;
use crate::device::{Device, Receiver, Transmitter};
use crate::frequency::Frequency;
use crate::ris::Ris;

/// Anything that can be added to a scene
#[derive(Debug, Clone)]
pub enum SceneItem {
    Transmitter(Transmitter),
    Receiver(Receiver),
    Ris(Ris),
}

impl SceneItem {
    pub fn name(&self) -> &str {
        self.as_device().name()
    }

    pub fn as_device(&self) -> &dyn Device {
        match self {
            SceneItem::Transmitter(tx) => tx as &dyn Device,
            SceneItem::Receiver(rx) => rx as &dyn Device,
            SceneItem::Ris(ris) => ris as &dyn Device,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            SceneItem::Transmitter(_) => "transmitter",
            SceneItem::Receiver(_) => "receiver",
            SceneItem::Ris(_) => "RIS",
        }
    }
}

impl From<Transmitter> for SceneItem {
    fn from(tx: Transmitter) -> Self {
        SceneItem::Transmitter(tx)
    }
}

impl From<Receiver> for SceneItem {
    fn from(rx: Receiver) -> Self {
        SceneItem::Receiver(rx)
    }
}

impl From<Ris> for SceneItem {
    fn from(ris: Ris) -> Self {
        SceneItem::Ris(ris)
    }
}

/// A radio scene
#[derive(Debug, Clone)]
pub struct Scene {
    frequency: Frequency,
    /// Trace from device centres and apply element offsets as phase shifts
    pub synthetic_array: bool,
    /// Antenna array used by all transmitters
    pub tx_array: Option<AntennaArray>,
    /// Antenna array used by all receivers
    pub rx_array: Option<AntennaArray>,
    transmitters: Vec<Transmitter>,
    receivers: Vec<Receiver>,
    ris: Vec<Ris>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            frequency: Frequency::default(),
            synthetic_array: true,
            tx_array: None,
            rx_array: None,
            transmitters: Vec::new(),
            receivers: Vec::new(),
            ris: Vec::new(),
        }
    }
}

impl Scene {
    /// Create an empty scene at the default carrier frequency
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene at the given carrier frequency
    pub fn with_frequency(frequency: Frequency) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    #[inline]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Change the carrier frequency; RIS cell spacings follow
    pub fn set_frequency(&mut self, frequency: Frequency) -> Result<(), SceneError> {
        debug!("Scene frequency set to {}", frequency);
        self.frequency = frequency;
        let wavelength = self.wavelength();
        for ris in &mut self.ris {
            ris.set_wavelength(wavelength)?;
        }
        Ok(())
    }

    /// Wavelength of the carrier [m]
    #[inline]
    pub fn wavelength(&self) -> f64 {
        self.frequency.wavelength()
    }

    /// Add a transmitter, receiver or RIS
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use rtscene_core::{Scene, Transmitter};
    ///
    /// let mut scene = Scene::new();
    /// scene.add(Transmitter::new("tx", Vector3::new(8.5, 21.0, 27.0), [0.0; 3])).unwrap();
    /// scene.remove("tx").unwrap();
    /// assert!(scene.get("tx").is_none());
    /// ```
    pub fn add(&mut self, item: impl Into<SceneItem>) -> Result<(), SceneError> {
        let item = item.into();
        if self.get(item.name()).is_some() {
            return Err(SceneError::NameInUse(item.name().to_string()));
        }
        debug!("Adding {} '{}' to the scene", item.kind(), item.name());

        match item {
            SceneItem::Transmitter(tx) => self.transmitters.push(tx),
            SceneItem::Receiver(rx) => self.receivers.push(rx),
            SceneItem::Ris(mut ris) => {
                ris.set_wavelength(self.wavelength())?;
                self.ris.push(ris);
            }
        }
        Ok(())
    }

    /// Remove the item called `name` and return it
    pub fn remove(&mut self, name: &str) -> Result<SceneItem, SceneError> {
        let item = if let Some(i) = self.transmitters.iter().position(|d| d.name() == name) {
            SceneItem::Transmitter(self.transmitters.remove(i))
        } else if let Some(i) = self.receivers.iter().position(|d| d.name() == name) {
            SceneItem::Receiver(self.receivers.remove(i))
        } else if let Some(i) = self.ris.iter().position(|d| d.name() == name) {
            SceneItem::Ris(self.ris.remove(i))
        } else {
            return Err(SceneError::UnknownItem(name.to_string()));
        };

        debug!("Removed {} '{}' from the scene", item.kind(), name);
        Ok(item)
    }

    /// Look up any item by name
    pub fn get(&self, name: &str) -> Option<&dyn Device> {
        if let Some(tx) = self.transmitter(name) {
            return Some(tx as &dyn Device);
        }
        if let Some(rx) = self.receiver(name) {
            return Some(rx as &dyn Device);
        }
        self.ris_by_name(name).map(|ris| ris as &dyn Device)
    }

    /// Look up any item by name for modification
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Device> {
        if let Some(i) = self.transmitters.iter().position(|d| d.name() == name) {
            return Some(&mut self.transmitters[i] as &mut dyn Device);
        }
        if let Some(i) = self.receivers.iter().position(|d| d.name() == name) {
            return Some(&mut self.receivers[i] as &mut dyn Device);
        }
        self.ris_by_name_mut(name).map(|ris| ris as &mut dyn Device)
    }

    pub fn transmitters(&self) -> &[Transmitter] {
        &self.transmitters
    }

    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    pub fn ris(&self) -> &[Ris] {
        &self.ris
    }

    pub fn transmitter(&self, name: &str) -> Option<&Transmitter> {
        self.transmitters.iter().find(|d| d.name() == name)
    }

    pub fn transmitter_mut(&mut self, name: &str) -> Option<&mut Transmitter> {
        self.transmitters.iter_mut().find(|d| d.name() == name)
    }

    pub fn receiver(&self, name: &str) -> Option<&Receiver> {
        self.receivers.iter().find(|d| d.name() == name)
    }

    pub fn receiver_mut(&mut self, name: &str) -> Option<&mut Receiver> {
        self.receivers.iter_mut().find(|d| d.name() == name)
    }

    pub fn ris_by_name(&self, name: &str) -> Option<&Ris> {
        self.ris.iter().find(|d| d.name() == name)
    }

    pub fn ris_by_name_mut(&mut self, name: &str) -> Option<&mut Ris> {
        self.ris.iter_mut().find(|d| d.name() == name)
    }

    /// Point the item `name` at the item `target`
    pub fn look_at(&mut self, name: &str, target: &str) -> Result<(), SceneError> {
        let target = self
            .get(target)
            .ok_or_else(|| SceneError::UnknownItem(target.to_string()))?
            .position();
        self.get_mut(name)
            .ok_or_else(|| SceneError::UnknownItem(name.to_string()))?
            .look_at(&target);
        Ok(())
    }
}
