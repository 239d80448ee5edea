use crate::get_reader;
use crate::location::Location;

/// A populated place that needs to be reached within the response
/// threshold. Weight is the population estimate of the node; it is never
/// negative in valid data and the engine rejects it otherwise.
#[derive(Debug, Clone)]
pub struct DemandPoint {
    pub id: u32,
    pub index: usize,
    pub location: Location,
    pub weight: f64,
}

impl DemandPoint {
    pub fn load(path: &str) -> Vec<DemandPoint> {
        // read demand nodes
        let mut rdr = csv::Reader::from_reader(get_reader(path));

        let header_row = rdr.headers().unwrap();

        // get the ids for the relevant columns!
        let id_column = header_row.iter().position(|x| x == "id").unwrap();
        let lat_column = header_row.iter().position(|x| x == "lat").unwrap();
        let lon_column = header_row.iter().position(|x| x == "lon").unwrap();
        let weight_column = header_row.iter().position(|x| x == "weight").unwrap();

        let mut points = Vec::new();

        for (index, result) in rdr.records().enumerate() {
            let record = result.unwrap();

            let id = record
                .get(id_column)
                .unwrap()
                .trim_start_matches('d')
                .parse::<u32>()
                .unwrap();
            let lat = record.get(lat_column).unwrap().parse::<f64>().unwrap();
            let lon = record.get(lon_column).unwrap().parse::<f64>().unwrap();
            let weight = record.get(weight_column).unwrap().parse::<f64>().unwrap();

            points.push(DemandPoint {
                id,
                index,
                location: Location::new(lat, lon),
                weight,
            });
        }

        points
    }
}
