use crate::filter::filter_trait::*;
use crate::filter::spline::CubicSpline;

/// Transmission interpolated from a table by a not-a-knot cubic spline
///
/// At least four points are required. Wavelengths must be strictly increasing and transmissions must be within `[0, 1]`. The
/// wavelength range is the tabulated one and evaluation outside of it is an error.
/// [FilterTrait::sample] returns the table itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "TabulatedFilterParameters",
    into = "TabulatedFilterParameters"
)]
pub struct TabulatedFilter {
    name: String,
    wl: Array1<f64>,
    tm: Array1<f64>,
    spline: CubicSpline,
}

impl TabulatedFilter {
    pub fn new(
        name: impl Into<String>,
        wl: impl Into<Vec<f64>>,
        tm: impl Into<Vec<f64>>,
    ) -> Result<Self, FilterError> {
        let (wl, tm) = (wl.into(), tm.into());
        if let Some(&x) = tm.iter().find(|&&x| !(0.0..=1.0).contains(&x)) {
            return Err(FilterError::TransmissionRange(x));
        }
        let spline = CubicSpline::new(&wl, &tm)?;
        Ok(Self {
            name: name.into(),
            wl: wl.into(),
            tm: tm.into(),
            spline,
        })
    }

    /// Tabulated wavelengths
    pub fn wl(&self) -> ArrayView1<'_, f64> {
        self.wl.view()
    }

    /// Tabulated transmissions
    pub fn tm(&self) -> ArrayView1<'_, f64> {
        self.tm.view()
    }
}

impl PartialEq for TabulatedFilter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.wl == other.wl && self.tm == other.tm
    }
}

impl FilterTrait for TabulatedFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn wl_range(&self) -> (f64, f64) {
        (self.spline.x_min(), self.spline.x_max())
    }

    fn transmission(&self, wl: f64) -> Result<f64, FilterError> {
        self.spline.evaluate(wl)
    }

    fn sample(&self, _n: usize) -> Result<(Array1<f64>, Array1<f64>), FilterError> {
        Ok((self.wl.clone(), self.tm.clone()))
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "TabulatedFilter")]
struct TabulatedFilterParameters {
    name: String,
    wl: Vec<f64>,
    tm: Vec<f64>,
}

impl From<TabulatedFilter> for TabulatedFilterParameters {
    fn from(f: TabulatedFilter) -> Self {
        Self {
            name: f.name,
            wl: f.wl.to_vec(),
            tm: f.tm.to_vec(),
        }
    }
}

impl TryFrom<TabulatedFilterParameters> for TabulatedFilter {
    type Error = FilterError;

    fn try_from(p: TabulatedFilterParameters) -> Result<Self, Self::Error> {
        Self::new(p.name, p.wl, p.tm)
    }
}

impl JsonSchema for TabulatedFilter {
    json_schema!(TabulatedFilterParameters, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    use ndarray::array;

    // 4u(1 - u) with u = (wl - 400) / 200, a quadratic is interpolated exactly
    fn dome() -> TabulatedFilter {
        TabulatedFilter::new(
            "dome",
            [400.0, 450.0, 500.0, 550.0, 600.0],
            [0.0, 0.75, 1.0, 0.75, 0.0],
        )
        .unwrap()
    }

    check_filter!(dome());

    #[test]
    fn reproduces_nodes() {
        let filter = dome();
        let tm = filter.evaluate(array![400.0, 450.0, 600.0].view()).unwrap();
        assert_eq!(tm, array![0.0, 0.75, 0.0]);
        assert_relative_eq!(filter.transmission(425.0).unwrap(), 0.4375, epsilon = 1e-14);
        assert_relative_eq!(filter.transmission(575.0).unwrap(), 0.4375, epsilon = 1e-14);
    }

    #[test]
    fn range_is_tabulated() {
        let filter = dome();
        assert_eq!(filter.wl_range(), (400.0, 600.0));
        assert_eq!(
            filter.transmission(399.0),
            Err(FilterError::OutOfRange {
                wl: 399.0,
                wl_min: 400.0,
                wl_max: 600.0
            })
        );
    }

    #[test]
    fn sample_returns_table() {
        let (wl, tm) = dome().sample(100).unwrap();
        assert_eq!(wl, array![400.0, 450.0, 500.0, 550.0, 600.0]);
        assert_eq!(tm, array![0.0, 0.75, 1.0, 0.75, 0.0]);
    }

    #[test]
    fn invalid_tables() {
        assert_eq!(
            TabulatedFilter::new("t", [1.0, 2.0, 3.0, 4.0], [0.5, 1.5, 0.5, 0.5]).unwrap_err(),
            FilterError::TransmissionRange(1.5)
        );
        assert_eq!(
            TabulatedFilter::new("t", [2.0, 1.0, 3.0, 4.0], [0.5; 4]).unwrap_err(),
            FilterError::Unsorted
        );
        assert_eq!(
            TabulatedFilter::new("t", [400.0, 500.0, 600.0], [0.0, 1.0, 0.0]).unwrap_err(),
            FilterError::TooFewPoints(3)
        );
        assert_eq!(
            TabulatedFilter::new("t", vec![1.0, 2.0, 3.0], vec![0.5, 0.5]).unwrap_err(),
            FilterError::SizeMismatch { n_wl: 3, n_tm: 2 }
        );
    }

    #[test]
    fn negative_zero_at_table_start() {
        let filter = TabulatedFilter::new("t", [0.0, 1.0, 2.0, 3.0], [0.0, 0.5, 1.0, 0.5]).unwrap();
        assert_eq!(filter.transmission(-0.0), Ok(0.0));
    }

    #[test]
    fn serde_round_trip_rebuilds_spline() {
        let filter = dome();
        let json = serde_json::to_string(&filter).unwrap();
        let restored: TabulatedFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, filter);
        assert_eq!(
            restored.transmission(520.0),
            filter.transmission(520.0)
        );
    }
}
