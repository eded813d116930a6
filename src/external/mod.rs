pub mod ip_geolocation;
