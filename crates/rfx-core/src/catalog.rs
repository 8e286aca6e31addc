//! Human-readable device model descriptions for sensor subtypes
//!
//! Descriptions follow the openHAB RFXCOM binding.

/// Description returned for keys that are not in the catalog
pub const UNKNOWN_DEVICE: &str = "Unknown device";

/// Static lookup from `"<protocolFamily>-<subtypeCode>"` to a device model description
pub struct SubtypeCatalog;

impl SubtypeCatalog {
    /// Build the catalog key for a sensor event.
    ///
    /// The temperature-only family is keyed `temp<subtype>`; every other
    /// family is keyed `<family>-<subtype>` with the family lowercased.
    ///
    /// ```
    /// # use rfx_core::SubtypeCatalog;
    /// assert_eq!(SubtypeCatalog::key("temperature1", "3"), "temp3");
    /// assert_eq!(SubtypeCatalog::key("TemperatureHumidity1", "2"), "temperaturehumidity1-2");
    /// ```
    pub fn key(family: &str, subtype: &str) -> String {
        let family = family.to_ascii_lowercase();
        if family == "temperature1" {
            format!("temp{}", subtype)
        } else {
            format!("{}-{}", family, subtype)
        }
    }

    /// Describe a subtype key; unknown keys resolve to [`UNKNOWN_DEVICE`]
    pub fn describe(key: &str) -> &'static str {
        match key {
            // Temperature
            "temp1" => "THR128/138, THC138",
            "temp2" => "THC238/268,THN132,THWR288,THRN122,THN122,AW129/131",
            "temp3" => "THWR800",
            "temp4" => "RTHN318",
            "temp5" => "La Crosse TX2, TX3, TX4, TX17",
            "temp6" => "TS15C. UPM temp only",
            "temp7" => "Viking 02811, Proove TSS330, 311346",
            "temp8" => "La Crosse WS2300",
            "temp9" => "Rubicson",
            "temp10" => " TFA 30.3133",
            "temp11" => " WT0122",

            // Temperature & humidity
            "temperaturehumidity1-1" => "THGN122/123, THGN132, THGR122/228/238/268",
            "temperaturehumidity1-2" => "THGR810, THGN800",
            "temperaturehumidity1-3" => "RTGR328",
            "temperaturehumidity1-4" => "THGR328",
            "temperaturehumidity1-5" => "WTGR800",
            "temperaturehumidity1-6" => "THGR918/928, THGRN228, THGN500",
            "temperaturehumidity1-7" => "TFA TS34C, Cresta",
            "temperaturehumidity1-8" => "WT260, WT260H, WT440H, WT450, WT450H",
            "temperaturehumidity1-9" => {
                "Viking 02035, 02038 (02035 has no humidity), Proove TSS320, 311501"
            }
            "temperaturehumidity1-10" => "Rubicson",
            "temperaturehumidity1-11" => "EW109",
            "temperaturehumidity1-12" => "Imagintronix/Opus XT300 Soil sensor",
            "temperaturehumidity1-13" => "Alecto WS1700 and compatibles",

            // Temperature & humidity & barometer
            "temperaturehumidity1-b1" => "BTHR918, BTHGN129",
            "temperaturehumidity1-b2" => "BTHR918N, BTHR968",

            _ => UNKNOWN_DEVICE,
        }
    }
}
