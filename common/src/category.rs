/// The four fixed 3DMark test phases a series key can point at through its
/// trailing digit (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    GraphicTest1,
    GraphicTest2,
    PhysicsTest,
    CombinedTest,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::GraphicTest1,
        Category::GraphicTest2,
        Category::PhysicsTest,
        Category::CombinedTest,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::GraphicTest1 => "Graphic Test 1",
            Category::GraphicTest2 => "Graphic Test 2",
            Category::PhysicsTest => "Physics Test",
            Category::CombinedTest => "Combined Test",
        }
    }

    /// Title with spaces replaced by underscores, for use in output filenames.
    pub fn file_stem(&self) -> String {
        self.title().replace(' ', "_")
    }

    /// Maps the last `_`-delimited segment of a series key to its category.
    pub fn from_suffix(suffix: &str) -> Option<Category> {
        match suffix {
            "1" => Some(Category::GraphicTest1),
            "2" => Some(Category::GraphicTest2),
            "3" => Some(Category::PhysicsTest),
            "4" => Some(Category::CombinedTest),
            _ => None,
        }
    }
}
