mod city;

pub use city::City;
