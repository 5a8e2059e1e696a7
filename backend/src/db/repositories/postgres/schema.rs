// Mirrors the externally managed measurement store; this crate never
// migrates it.

diesel::table! {
    measurements (station_id, pollutant, ts) {
        station_id -> Text,
        pollutant -> Text,
        value -> Nullable<Float8>,
        unit -> Nullable<Text>,
        city -> Nullable<Text>,
        location_name -> Nullable<Text>,
        lat -> Nullable<Float8>,
        lon -> Nullable<Float8>,
        country -> Nullable<Text>,
        ts -> Timestamptz,
        source -> Nullable<Text>,
    }
}

diesel::table! {
    stations (station_id) {
        station_id -> Text,
        source -> Nullable<Text>,
        country -> Nullable<Text>,
        city -> Nullable<Text>,
        location_name -> Nullable<Text>,
        lat -> Nullable<Float8>,
        lon -> Nullable<Float8>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(measurements, stations);
