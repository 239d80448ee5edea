use crate::get_reader;
use crate::location::Location;
use indexmap::IndexMap;

use std::hash::{Hash, Hasher};

/// A location where a facility may be opened. `index` is the column of
/// this site in every travel-time and coverage matrix.
#[derive(Debug, Clone)]
pub struct CandidateSite {
    pub id: u32,
    pub index: usize,
    pub location: Location,
}

impl Hash for CandidateSite {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write_u32(self.id);
        state.finish();
    }
}

impl Eq for CandidateSite {}

impl PartialEq for CandidateSite {
    fn eq(&self, other: &CandidateSite) -> bool {
        self.id == other.id
    }
}

impl CandidateSite {
    pub fn load(path: &str) -> IndexMap<u32, CandidateSite> {
        // read candidate stations
        let mut rdr = csv::Reader::from_reader(get_reader(path));

        let mut sites: IndexMap<u32, CandidateSite> = IndexMap::default();

        let mut index_counter = 0;

        let header_row = rdr.headers().unwrap();

        // get the ids for the relevant columns!
        let id_column = header_row.iter().position(|x| x == "id").unwrap();
        let lat_column = header_row.iter().position(|x| x == "lat").unwrap();
        let lon_column = header_row.iter().position(|x| x == "lon").unwrap();

        for result in rdr.records() {
            let record = result.unwrap();

            let site_id = record
                .get(id_column)
                .unwrap()
                .trim_start_matches('s')
                .parse::<u32>()
                .unwrap();
            let lat = record.get(lat_column).unwrap().parse::<f64>().unwrap();
            let lon = record.get(lon_column).unwrap().parse::<f64>().unwrap();

            let site = CandidateSite {
                id: site_id,
                index: index_counter,
                location: Location::new(lat, lon),
            };

            sites.insert(site_id, site);
            index_counter += 1;
        }

        sites
    }
}
