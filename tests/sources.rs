// tests/sources.rs
//
// Offline parsing of the upstream file layouts.

use chrono::NaiveDate;
use covid19_analyzer::config::consts::{GLOBAL, WORLDWIDE};
use covid19_analyzer::data::{Dataset, Record, Subset};
use covid19_analyzer::specs::{funke, jhu, parse_count, parse_date};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, m, d).unwrap()
}

fn find<'a>(ds: &'a Dataset, parent: &str, region: &str, date: NaiveDate) -> &'a Record {
    ds.rows
        .iter()
        .find(|r| r.parent_region == parent && r.region == region && r.date == date)
        .unwrap_or_else(|| panic!("no row {parent}/{region} {date}"))
}

const HISTORY: &str = "\
label,label_en,label_parent,label_parent_en,date,confirmed,recovered,deaths,lon,lat
Bayern,Bavaria,Deutschland,Germany,20200301,10,2,1,11.4,48.8
Bayern,Bavaria,Deutschland,Germany,20200302,20,4,1,11.4,48.8
Deutschland,Germany,,,20200301,100,10,5,,
Italien,,,,20200301,50,,,,
";

#[test]
fn dates_and_counts() {
    assert_eq!(parse_date("2020-03-01").unwrap(), day(3, 1));
    assert_eq!(parse_date("20200301").unwrap(), day(3, 1));
    assert_eq!(parse_date("3/1/20").unwrap(), day(3, 1));
    assert_eq!(parse_date("2020-03-01 00:00:00").unwrap(), day(3, 1));
    assert!(parse_date("yesterday").is_err());

    assert_eq!(parse_count("").unwrap(), None);
    assert_eq!(parse_count("NaN").unwrap(), None);
    assert_eq!(parse_count(" 42 ").unwrap(), Some(42.0));
    assert!(parse_count("many").is_err());
}

#[test]
fn funke_history_yields_both_languages() {
    let data = funke::parse_history(HISTORY.as_bytes()).unwrap();

    assert_eq!(data.de.len(), 4);
    assert_eq!(data.en.len(), 4);

    let bayern = find(&data.de, "Deutschland", "Bayern", day(3, 1));
    assert_eq!(bayern.confirmed, Some(10.0));
    assert_eq!(bayern.still_infectious, Some(7.0));

    let bavaria = find(&data.en, "Germany", "Bavaria", day(3, 2));
    assert_eq!(bavaria.confirmed, Some(20.0));

    // no parent → #Global, no English label → German label
    let italien = find(&data.en, GLOBAL, "Italien", day(3, 1));
    assert_eq!(italien.recovered, None);
    assert_eq!(italien.still_infectious, Some(50.0));
    find(&data.de, GLOBAL, "Deutschland", day(3, 1));
    find(&data.en, GLOBAL, "Germany", day(3, 1));
}

#[test]
fn funke_rows_are_sorted_and_translation_deduplicated() {
    let data = funke::parse_history(HISTORY.as_bytes()).unwrap();

    let keys: Vec<(NaiveDate, &str, &str)> = data
        .de
        .rows
        .iter()
        .map(|r| (r.date, r.parent_region.as_str(), r.region.as_str()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    assert_eq!(data.translation.len(), 3);
    let bayern = data.translation.iter().find(|e| e.label == "Bayern").unwrap();
    assert_eq!(bayern.label_en, "Bavaria");
    assert_eq!(bayern.label_parent, "Deutschland");
    assert_eq!(bayern.label_parent_en, "Germany");
}

const CONFIRMED: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20
,Italy,41.9,12.6,1,3
Hubei,China,30.9,112.3,10,20
Beijing,China,40.2,116.4,2,4
";

const DEATHS: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20
,Italy,41.9,12.6,0,1
Hubei,China,30.9,112.3,1,2
Beijing,China,40.2,116.4,0,0
";

const RECOVERED: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20
,Italy,41.9,12.6,0,0
Hubei,China,30.9,112.3,0,5
Beijing,China,40.2,116.4,0,1
";

fn jhu_dataset() -> Dataset {
    let c = jhu::parse_subset(CONFIRMED.as_bytes()).unwrap();
    let d = jhu::parse_subset(DEATHS.as_bytes()).unwrap();
    let r = jhu::parse_subset(RECOVERED.as_bytes()).unwrap();
    jhu::build_dataset(jhu::merge_subsets(c, d, r))
}

#[test]
fn jhu_subset_is_melted_to_long_rows() {
    let rows = jhu::parse_subset(CONFIRMED.as_bytes()).unwrap();
    assert_eq!(rows.len(), 6);

    let italy: Vec<_> = rows.iter().filter(|v| v.region == "Italy").collect();
    assert_eq!(italy.len(), 2);
    assert!(italy.iter().all(|v| v.parent_region == GLOBAL));
    assert_eq!(italy[1].date, day(1, 23));
    assert_eq!(italy[1].value, Some(3.0));

    let hubei = rows.iter().find(|v| v.region == "Hubei").unwrap();
    assert_eq!(hubei.parent_region, "China");
}

#[test]
fn jhu_merge_is_an_inner_join() {
    let c = jhu::parse_subset(CONFIRMED.as_bytes()).unwrap();
    let d = jhu::parse_subset(DEATHS.as_bytes()).unwrap();
    // recovered without Beijing
    let r: Vec<_> = jhu::parse_subset(RECOVERED.as_bytes())
        .unwrap()
        .into_iter()
        .filter(|v| v.region != "Beijing")
        .collect();

    let merged = jhu::merge_subsets(c, d, r);
    assert_eq!(merged.len(), 4);
    assert!(merged.iter().all(|m| m.region != "Beijing"));
}

#[test]
fn jhu_dataset_has_country_and_worldwide_totals() {
    let ds = jhu_dataset();

    // 3 base rows + China (total) + #Worldwide, per day
    assert_eq!(ds.len(), 10);

    let china = find(&ds, GLOBAL, "China (total)", day(1, 23));
    assert_eq!(china.confirmed, Some(24.0));
    assert_eq!(china.deaths, Some(2.0));
    assert_eq!(china.recovered, Some(6.0));

    let world = find(&ds, GLOBAL, WORLDWIDE, day(1, 23));
    assert_eq!(world.confirmed, Some(27.0));
    assert_eq!(world.deaths, Some(3.0));
    assert_eq!(world.recovered, Some(6.0));
    assert_eq!(world.still_infectious, Some(18.0));

    assert_eq!(ds.available_subsets(), Subset::ALL.to_vec());
    assert_eq!(ds.parent_regions(), vec!["#Global".to_string(), "China".to_string()]);
}
