use crate::{edge_direction::EdgeDirection, properties::property::Property};

#[derive(Clone, Debug, Default)]
struct SmallMap<T>(Vec<(Property, T)>);

impl<T: Copy> SmallMap<T> {
    fn get(&self, property: Property) -> Option<T> {
        self.0
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, value)| *value)
    }

    fn insert(&mut self, property: Property, value: T) -> Option<T> {
        match self.0.iter_mut().find(|(p, _)| *p == property) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.0.push((property, value));
                None
            }
        }
    }
}

/// Static per-direction attributes of an edge.
#[derive(Clone, Debug, Default)]
pub struct EdgePropertyMap {
    forward_bool_values: SmallMap<bool>,
    backward_bool_values: SmallMap<bool>,
    forward_f32_values: SmallMap<f32>,
    backward_f32_values: SmallMap<f32>,
}

impl EdgePropertyMap {
    pub fn new() -> EdgePropertyMap {
        EdgePropertyMap::default()
    }

    /// Car road with the given average speed (km/h) per direction, `None`
    /// meaning the direction is closed to cars.
    pub fn car(forward_speed: Option<f32>, backward_speed: Option<f32>) -> EdgePropertyMap {
        let mut properties = EdgePropertyMap::new();

        for (direction, speed) in [
            (EdgeDirection::Forward, forward_speed),
            (EdgeDirection::Backward, backward_speed),
        ] {
            properties.insert_bool(Property::CarAccess, direction, speed.is_some());
            if let Some(speed) = speed {
                properties.insert_f32(Property::CarAverageSpeed, direction, speed);
            }
        }

        properties
    }

    pub fn get_bool(&self, property: Property, direction: EdgeDirection) -> Option<bool> {
        match direction {
            EdgeDirection::Forward => self.forward_bool_values.get(property),
            EdgeDirection::Backward => self.backward_bool_values.get(property),
        }
    }

    pub fn get_f32(&self, property: Property, direction: EdgeDirection) -> Option<f32> {
        match direction {
            EdgeDirection::Forward => self.forward_f32_values.get(property),
            EdgeDirection::Backward => self.backward_f32_values.get(property),
        }
    }

    /// Returns the previous value, if any.
    pub fn insert_bool(
        &mut self,
        property: Property,
        direction: EdgeDirection,
        value: bool,
    ) -> Option<bool> {
        match direction {
            EdgeDirection::Forward => self.forward_bool_values.insert(property, value),
            EdgeDirection::Backward => self.backward_bool_values.insert(property, value),
        }
    }

    /// Returns the previous value, if any.
    pub fn insert_f32(
        &mut self,
        property: Property,
        direction: EdgeDirection,
        value: f32,
    ) -> Option<f32> {
        match direction {
            EdgeDirection::Forward => self.forward_f32_values.insert(property, value),
            EdgeDirection::Backward => self.backward_f32_values.insert(property, value),
        }
    }
}
