// crates/geography-server/tests/common/mod.rs

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use geography_core::{Catalog, CsvSource, Importer};
use serde_json::Value;
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;

const COUNTRIES: &str = "\
id,code,name,continent,wikipedia_link,keywords
302672,NL,Netherlands,EU,https://en.wikipedia.org/wiki/Netherlands,Holland
302618,BE,Belgium,EU,https://en.wikipedia.org/wiki/Belgium,
";

const REGIONS: &str = "\
id,code,local_code,name,continent,iso_country,wikipedia_link,keywords
306160,NL-NH,NH,North Holland,EU,NL,,
306161,NL-ZH,ZH,South Holland,EU,NL,,
306155,NL-FL,FL,Flevoland,EU,NL,,
303209,BE-VBR,VBR,Vlaams-Brabant,EU,BE,,
";

const AIRPORTS: &str = "\
id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,continent,iso_country,iso_region,municipality,scheduled_service,gps_code,iata_code,local_code,home_link,wikipedia_link,keywords
2513,EHAM,large_airport,Amsterdam Airport Schiphol,52.308601,4.76389,-11,EU,NL,NL-NH,Amsterdam,yes,EHAM,AMS,,,,
2522,EHRD,medium_airport,Rotterdam The Hague Airport,51.956902,4.43722,-15,EU,NL,NL-ZH,Rotterdam,yes,EHRD,RTM,,,,
2518,EHLE,medium_airport,Lelystad Airport,52.4603,5.52722,-13,EU,NL,NL-FL,Lelystad,yes,EHLE,LEY,,,,
2520,EHMZ,small_airport,Midden-Zeeland Airport,51.5122,3.73111,6,EU,NL,NL-ZH,Middelburg,no,EHMZ,,,,,
2184,EBBR,large_airport,Brussels Airport,50.901402,4.48444,184,EU,BE,BE-VBR,Brussels,yes,EBBR,BRU,,,,
";

const RUNWAYS: &str = "\
id,airport_ref,airport_ident,length_ft,width_ft,surface,lighted,closed,le_ident,le_latitude_deg,le_longitude_deg,le_elevation_ft,le_heading_degT,le_displaced_threshold_ft,he_ident,he_latitude_deg,he_longitude_deg,he_elevation_ft,he_heading_degT,he_displaced_threshold_ft
1,2513,EHAM,11329,148,ASP,1,0,09,52.3166,4.7466,-12,87,,27,52.3185,4.7966,-11,267,
2,2513,EHAM,10827,148,ASP,1,0,18C,52.3314,4.7400,-12,183,,36C,52.3008,4.7371,-13,3,
3,2513,EHAM,6608,148,ASP,1,1,04,52.3003,4.7836,-15,41,,22,52.3169,4.7976,-11,221,
";

const FREQUENCIES: &str = "\
id,airport_ref,airport_ident,type,description,frequency_mhz
1,2513,EHAM,TWR,Schiphol Tower,118.1
2,2513,EHAM,ATIS,Schiphol Arrival ATIS,132.975
3,2513,EHAM,GND,Schiphol Ground,121.8
";

fn source(body: &str) -> CsvSource<Cursor<Vec<u8>>> {
    CsvSource::open("fixture", Cursor::new(body.as_bytes().to_vec())).unwrap()
}

/// A small Dutch/Belgian catalog with a result ceiling of 3.
pub fn catalog() -> Arc<Catalog> {
    let mut catalog = Catalog::new().with_max_results(3);
    let mut importer = Importer::new(&mut catalog);
    importer.import_countries(source(COUNTRIES)).unwrap();
    importer.import_regions(source(REGIONS)).unwrap();
    importer.import_airports(source(AIRPORTS)).unwrap();
    importer.import_runways(source(RUNWAYS)).unwrap();
    importer.import_frequencies(source(FREQUENCIES)).unwrap();
    Arc::new(catalog)
}

pub fn app() -> Router {
    geography_server::router(catalog())
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn get(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app(), request).await
}

pub async fn graphql(query: &str) -> Value {
    let body = serde_json::json!({ "query": query }).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/geography/graphql")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, value) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    value
}
