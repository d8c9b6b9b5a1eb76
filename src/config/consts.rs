// src/config/consts.rs

// Local data (CSV artifacts)
pub const DATA_DIR: &str = "data";
pub const DATA_DIR_ENV: &str = "COVID19_DATA_DIR";
pub const INFECTIONS_FILE: &str = "covid19_infections.csv";
pub const TRANSLATION_TABLE_FILE: &str = "translation_table.csv";

// Local cache / logs
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Region labels
pub const GLOBAL: &str = "#Global";
pub const WORLDWIDE: &str = "#Worldwide";
pub const TOTAL_SUFFIX: &str = " (total)";

// Net config
pub const FUNKE_URL: &str = "https://funkeinteraktiv.b-cdn.net/history.v4.csv";
pub const JHU_URL_PREFIX: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_";
pub const JHU_URL_SUFFIX: &str = "_global.csv";
pub const HTTP_TIMEOUT_SECS: u64 = 60;
pub const USER_AGENT: &str = concat!("covid19_analyzer/", env!("CARGO_PKG_VERSION"));

// Analysis
pub const DEFAULT_SIGMA: f64 = 5.0;
pub const DEFAULT_DAYS_TO_PREDICT: usize = 30;
pub const LM_MAX_ITERATIONS: usize = 2000;
pub const LM_TOLERANCE: f64 = 1.5e-8;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE_PREFIX: &str = "covid19_data_";

// GUI
pub const WINDOW_W: f32 = 1280.0;
pub const WINDOW_H: f32 = 820.0;
