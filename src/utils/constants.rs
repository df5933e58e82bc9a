/// Remote archive source
pub const GSOD_BASE_URL: &str = "https://www.ncei.noaa.gov/data/global-summary-of-the-day/archive/";
pub const ARCHIVE_EXTENSION: &str = ".tar.gz";

/// Directory names
pub const DEFAULT_ARCHIVE_DIR: &str = "noaa_gsod";
pub const DEFAULT_STATION_DIR: &str = "station_id_data";

/// Station allowlist files: {station_dir}/{region}_stations.csv
pub const STATIONS_FILE_SUFFIX: &str = "_stations.csv";
pub const STATION_ID_COLUMN: &str = "STATION_ID";

/// Archive members are named {STATION_ID} plus a suffix of this length (".csv")
pub const MEMBER_SUFFIX_LEN: usize = 4;

/// Missing-value sentinels in the raw GSOD files
pub const WIND_SPEED_SENTINEL: f64 = 999.9;
pub const PRECIPITATION_SENTINEL: f64 = 99.99;
pub const TEMPERATURE_SENTINEL: f64 = 9999.9;

/// Date formats seen in the DATE column
pub const GSOD_DATE_FORMAT: &str = "%Y-%m-%d";
pub const GSOD_COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Network defaults
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
