// crates/geography-server/tests/graphql.rs

mod common;

use common::graphql;

#[tokio::test]
async fn airport_resolves_its_joins() {
    let body = graphql(
        r#"{ airport(code: "eham") {
               icaoCode iataCode type elevation
               country { name }
               region { code name }
               frequencies { type mhz }
           } }"#,
    )
    .await;
    assert!(body.get("errors").is_none(), "{body}");

    let airport = &body["data"]["airport"];
    assert_eq!(airport["icaoCode"], "EHAM");
    assert_eq!(airport["iataCode"], "AMS");
    assert_eq!(airport["type"], "large_airport");
    assert_eq!(airport["country"]["name"], "Netherlands");
    assert_eq!(airport["region"]["code"], "NL-NH");
    assert_eq!(airport["frequencies"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn runway_filters_and_back_references() {
    let body = graphql(
        r#"{ runways(airport: "EHAM", fromHeading: "180", untilHeading: "200") {
               code alternateCode heading airport { icaoCode }
           } }"#,
    )
    .await;
    assert!(body.get("errors").is_none(), "{body}");

    let runways = body["data"]["runways"].as_array().unwrap();
    assert_eq!(runways.len(), 1);
    assert_eq!(runways[0]["code"], "18C");
    assert_eq!(runways[0]["alternateCode"], "36C");
    assert_eq!(runways[0]["airport"]["icaoCode"], "EHAM");
}

#[tokio::test]
async fn region_lists_its_airports() {
    let body = graphql(r#"{ region(code: "nl-zh") { name country { code } airports { icaoCode } } }"#).await;
    assert!(body.get("errors").is_none(), "{body}");

    let region = &body["data"]["region"];
    assert_eq!(region["name"], "South Holland");
    assert_eq!(region["country"]["code"], "NL");
    let airports: Vec<&str> = region["airports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["icaoCode"].as_str().unwrap())
        .collect();
    assert_eq!(airports, ["EHMZ", "EHRD"]);
}

#[tokio::test]
async fn frequency_lookup_by_type() {
    let body = graphql(r#"{ frequency(airport: "EHAM", type: "twr") { description mhz } }"#).await;
    assert!(body.get("errors").is_none(), "{body}");
    assert_eq!(body["data"]["frequency"]["description"], "Schiphol Tower");
    assert_eq!(body["data"]["frequency"]["mhz"], 118.1);
}

#[tokio::test]
async fn errors_carry_a_code() {
    let body = graphql(r#"{ country(code: "XX") { name } }"#).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");

    let body = graphql(r#"{ airports(country: "NL") { icaoCode } }"#).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "TOO_MANY_RESULTS");

    let body = graphql(r#"{ countries(from: "N1") { code } }"#).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "BAD_INPUT");
}
