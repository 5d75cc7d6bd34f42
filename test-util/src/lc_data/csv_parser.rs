use crate::lc_data::{Error, FluxRecord, SectorLightCurves};

use itertools::{Itertools, process_results};
use std::io::Read;

/// Parse `time,flux,sector` CSV rows, consecutive rows of the same sector form a light curve
pub(super) fn sectors_from_reader<R>(reader: R) -> Result<SectorLightCurves, Error>
where
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let lcs = process_results(csv_reader.deserialize::<FluxRecord>(), |iter| {
        let mut lcs = SectorLightCurves::default();
        for (_sector, records) in &iter.chunk_by(|record| record.sector) {
            let (t, f): (Vec<_>, Vec<_>) = records.map(|record| (record.time, record.flux)).unzip();
            lcs.push(t, f);
        }
        lcs
    })?;
    Ok(lcs)
}
