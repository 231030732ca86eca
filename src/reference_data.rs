// Per-100g reference values: (name, kcal, protein g, fat g, carbohydrate g).
//
// Order matters for partial matches: keep specific names ahead of the
// generic ones they contain ("chicken breast" before "chicken").
pub const BUILTIN_PROFILES: &[(&str, u32, f64, f64, f64)] = &[
    // Meat and fish
    ("chicken breast", 165, 31.0, 3.6, 0.0),
    ("chicken thigh", 209, 26.0, 10.9, 0.0),
    ("chicken wings", 203, 30.5, 8.1, 0.0),
    ("chicken", 239, 27.3, 13.6, 0.0),
    ("turkey", 189, 29.0, 7.4, 0.0),
    ("ground beef", 250, 26.0, 15.0, 0.0),
    ("beef", 271, 25.0, 19.0, 0.0),
    ("pork", 242, 27.0, 14.0, 0.0),
    ("bacon", 541, 37.0, 42.0, 1.4),
    ("ham", 145, 21.0, 6.0, 1.5),
    ("salmon", 208, 20.0, 13.0, 0.0),
    ("tuna", 132, 28.0, 1.3, 0.0),
    ("shrimp", 99, 24.0, 0.3, 0.2),
    ("egg", 155, 13.0, 11.0, 1.1),
    ("tofu", 76, 8.0, 4.8, 1.9),
    // Dairy and fats
    ("peanut butter", 588, 25.0, 50.0, 20.0),
    ("butter", 717, 0.85, 81.11, 0.06),
    ("milk", 61, 3.2, 3.3, 4.8),
    ("heavy cream", 340, 2.8, 36.0, 2.7),
    ("greek yogurt", 59, 10.0, 0.4, 3.6),
    ("yogurt", 61, 3.5, 3.3, 4.7),
    ("cheddar cheese", 403, 25.0, 33.0, 1.3),
    ("mozzarella", 280, 28.0, 17.0, 3.1),
    ("parmesan", 431, 38.0, 29.0, 4.1),
    ("cheese", 402, 25.0, 33.0, 1.3),
    ("olive oil", 884, 0.0, 100.0, 0.0),
    ("vegetable oil", 884, 0.0, 100.0, 0.0),
    // Grains and baking
    ("brown rice", 111, 2.6, 0.9, 23.0),
    ("rice", 130, 2.7, 0.3, 28.0),
    ("pasta", 131, 5.0, 1.1, 25.0),
    ("bread", 265, 9.0, 3.2, 49.0),
    ("flour", 364, 10.0, 1.0, 76.0),
    ("oats", 389, 16.9, 6.9, 66.3),
    ("sugar", 387, 0.0, 0.0, 100.0),
    ("honey", 304, 0.3, 0.0, 82.0),
    ("dark chocolate", 546, 4.9, 31.0, 61.0),
    // Vegetables
    ("sweet potato", 86, 1.6, 0.1, 20.0),
    ("potato", 77, 2.0, 0.1, 17.0),
    ("tomato", 18, 0.9, 0.2, 3.9),
    ("onion", 40, 1.1, 0.1, 9.3),
    ("garlic", 149, 6.4, 0.5, 33.0),
    ("carrot", 41, 0.9, 0.2, 9.6),
    ("broccoli", 34, 2.8, 0.4, 7.0),
    ("spinach", 23, 2.9, 0.4, 3.6),
    ("lettuce", 15, 1.4, 0.2, 2.9),
    ("cucumber", 15, 0.7, 0.1, 3.6),
    ("bell pepper", 31, 1.0, 0.3, 6.0),
    ("mushroom", 22, 3.1, 0.3, 3.3),
    ("avocado", 160, 2.0, 15.0, 9.0),
    // Fruit
    ("apple", 52, 0.3, 0.2, 14.0),
    ("banana", 89, 1.1, 0.3, 23.0),
    ("orange", 47, 0.9, 0.1, 12.0),
    ("lemon", 29, 1.1, 0.3, 9.0),
    ("strawberry", 32, 0.7, 0.3, 7.7),
    ("blueberries", 57, 0.7, 0.3, 14.0),
    // Nuts and legumes
    ("almonds", 579, 21.0, 50.0, 22.0),
    ("walnuts", 654, 15.0, 65.0, 14.0),
    ("lentils", 116, 9.0, 0.4, 20.0),
    ("chickpeas", 164, 8.9, 2.6, 27.0),
    ("black beans", 132, 8.9, 0.5, 24.0),
    // Seasoning and liquids
    ("black pepper", 251, 10.0, 3.3, 64.0),
    ("salt", 0, 0.0, 0.0, 0.0),
    ("water", 0, 0.0, 0.0, 0.0),
];
