// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person[name={}, age={}]", self.name, self.age)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Animal {
    pub name: String,
    pub legs: u32,
}

impl Animal {
    pub fn new(name: impl Into<String>, legs: u32) -> Self {
        Self {
            name: name.into(),
            legs,
        }
    }
}

impl Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Animal[name={}, legs={}]", self.name, self.legs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Plant {
    pub species: String,
    pub height: u32,
}

impl Plant {
    pub fn new(species: impl Into<String>, height: u32) -> Self {
        Self {
            species: species.into(),
            height,
        }
    }
}

impl Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plant[species={}, height={}]", self.species, self.height)
    }
}

/// Payload used by the counting producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntValue(pub i64);

pub fn person_alice() -> Person {
    Person::new("Alice", 25)
}

pub fn person_bob() -> Person {
    Person::new("Bob", 30)
}

pub fn animal_dog() -> Animal {
    Animal::new("Dog", 4)
}

pub fn animal_spider() -> Animal {
    Animal::new("Spider", 8)
}

pub fn plant_rose() -> Plant {
    Plant::new("Rose", 15)
}

/// `[0, 4, 8, ..]`: `count` multiples of four.
pub fn multiples_of_four(count: i64) -> Vec<IntValue> {
    (0..count).map(|i| IntValue(i << 2)).collect()
}

/// `[0, 10000, 20000, ..]`: `count` multiples of ten thousand.
pub fn multiples_of_ten_thousand(count: i64) -> Vec<IntValue> {
    (0..count).map(|i| IntValue(i * 10_000)).collect()
}
