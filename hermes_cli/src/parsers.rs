use hermes_td_routing::geopoint::GeoPoint;
use jiff::{Timestamp, civil::DateTime, tz::TimeZone};

/// `lat,lng` in degrees.
pub fn parse_coordinates(input: &str) -> Result<GeoPoint, String> {
    let Some((lat, lng)) = input.split_once(',') else {
        return Err(String::from("Expected coordinates as lat,lng"));
    };

    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("Invalid latitude: {error}"))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("Invalid longitude: {error}"))?;

    let point = GeoPoint::new(lat, lng);
    if !point.is_valid() {
        return Err(format!("Coordinates out of range: {lat},{lng}"));
    }

    Ok(point)
}

/// RFC 3339 timestamp, civil date time in UTC or milliseconds since the
/// Unix epoch.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, String> {
    if let Ok(timestamp) = input.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    if let Ok(timestamp) = input
        .parse::<DateTime>()
        .and_then(|datetime| datetime.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
    {
        return Ok(timestamp);
    }

    if let Ok(milliseconds) = input.parse::<i64>() {
        return Timestamp::from_millisecond(milliseconds).map_err(|error| error.to_string());
    }

    Err(String::from("Invalid departure time"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        assert_eq!(
            parse_coordinates("43.730729, 7.42135"),
            Ok(GeoPoint::new(43.730729, 7.42135))
        );
        assert!(parse_coordinates("43.73").is_err());
        assert!(parse_coordinates("93.0,7.42").is_err());
    }

    #[test]
    fn parses_timestamps() {
        let expected = Timestamp::from_millisecond(1_709_537_400_000).unwrap();

        assert_eq!(parse_timestamp("2024-03-04T07:30:00Z"), Ok(expected));
        assert_eq!(parse_timestamp("2024-03-04T07:30"), Ok(expected));
        assert_eq!(parse_timestamp("1709537400000"), Ok(expected));
        assert!(parse_timestamp("tomorrow").is_err());
    }
}
