use crate::filter::filter_trait::*;

/// Unity transmission strictly between the wavelength limits and zero elsewhere
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(
    try_from = "BoxcarFilterParameters",
    into = "BoxcarFilterParameters"
)]
pub struct BoxcarFilter {
    name: String,
    wl_min: f64,
    wl_max: f64,
}

impl BoxcarFilter {
    pub fn new(name: impl Into<String>, wl_min: f64, wl_max: f64) -> Result<Self, FilterError> {
        if !(wl_min.is_finite() && wl_max.is_finite() && wl_min < wl_max) {
            return Err(FilterError::InvalidRange { wl_min, wl_max });
        }
        Ok(Self {
            name: name.into(),
            wl_min,
            wl_max,
        })
    }
}

impl FilterTrait for BoxcarFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn wl_range(&self) -> (f64, f64) {
        (self.wl_min, self.wl_max)
    }

    fn transmission(&self, wl: f64) -> Result<f64, FilterError> {
        Ok(if wl > self.wl_min && wl < self.wl_max {
            1.0
        } else {
            0.0
        })
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "BoxcarFilter")]
struct BoxcarFilterParameters {
    name: String,
    wl_min: f64,
    wl_max: f64,
}

impl From<BoxcarFilter> for BoxcarFilterParameters {
    fn from(f: BoxcarFilter) -> Self {
        Self {
            name: f.name,
            wl_min: f.wl_min,
            wl_max: f.wl_max,
        }
    }
}

impl TryFrom<BoxcarFilterParameters> for BoxcarFilter {
    type Error = FilterError;

    fn try_from(p: BoxcarFilterParameters) -> Result<Self, Self::Error> {
        Self::new(p.name, p.wl_min, p.wl_max)
    }
}

impl JsonSchema for BoxcarFilter {
    json_schema!(BoxcarFilterParameters, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    use ndarray::array;

    check_filter!(BoxcarFilter::new("V", 500.0, 600.0).unwrap());

    #[test]
    fn edges_are_exclusive() {
        let filter = BoxcarFilter::new("V", 500.0, 600.0).unwrap();
        let tm = filter
            .evaluate(array![499.0, 500.0, 500.001, 550.0, 599.999, 600.0, 700.0].view())
            .unwrap();
        assert_eq!(tm, array![0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn sample_is_inside_edges() {
        let filter = BoxcarFilter::new("V", 500.0, 600.0).unwrap();
        let (wl, tm) = filter.sample(11).unwrap();
        assert_relative_eq!(wl[0], 500.00001, epsilon = 1e-9);
        assert!(tm.iter().all(|&x| x == 1.0));
        assert_eq!(filter.sample(1), Err(FilterError::SampleSize(1)));
    }

    #[test]
    fn invalid_range() {
        assert_eq!(
            BoxcarFilter::new("bad", 600.0, 500.0),
            Err(FilterError::InvalidRange {
                wl_min: 600.0,
                wl_max: 500.0
            })
        );
        assert!(BoxcarFilter::new("bad", 500.0, 500.0).is_err());
        assert!(BoxcarFilter::new("bad", f64::NAN, 500.0).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let filter: BoxcarFilter =
            serde_json::from_str(r#"{"name": "g'", "wl_min": 400.0, "wl_max": 550.0}"#).unwrap();
        assert_eq!(filter.wl_range(), (400.0, 550.0));
        assert!(
            serde_json::from_str::<BoxcarFilter>(
                r#"{"name": "g'", "wl_min": 550.0, "wl_max": 400.0}"#
            )
            .is_err()
        );
    }
}
