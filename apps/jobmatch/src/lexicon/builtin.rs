use super::{SkillCategory, SkillTerm};

use SkillCategory::{Framework, Language, Platform, SoftSkill, Tool};

/// Built-in skill table: (canonical, category, aliases).
///
/// The canonical name is always matched as well; aliases only need to list
/// the other spellings. Deliberately absent: one-letter languages ("R", "C"
/// without suffix) and generic words ("api", "testing", "less") that would
/// fire on ordinary prose.
const BUILTIN_TERMS: &[(&str, SkillCategory, &[&str])] = &[
    // Languages
    ("Python", Language, &["python3", "python 3", "py"]),
    ("Java", Language, &["java 8", "java 11", "java 17", "core java"]),
    ("JavaScript", Language, &["js", "java script", "ecmascript", "es6"]),
    ("TypeScript", Language, &["ts", "type script"]),
    ("Go", Language, &["golang", "go lang"]),
    ("Rust", Language, &["rustlang"]),
    ("C++", Language, &["cpp", "cplusplus"]),
    ("C#", Language, &["csharp", "c sharp"]),
    ("PHP", Language, &["php7", "php8"]),
    ("Ruby", Language, &[]),
    ("Kotlin", Language, &[]),
    ("Swift", Language, &[]),
    ("Scala", Language, &[]),
    ("MATLAB", Language, &[]),
    ("SQL", Language, &["t sql", "pl sql", "plsql"]),
    ("HTML", Language, &["html5"]),
    ("CSS", Language, &["css3"]),
    ("Bash", Language, &["shell scripting", "shell script", "bash scripting"]),
    ("PowerShell", Language, &["power shell"]),
    // Frameworks and libraries
    ("React", Framework, &["reactjs", "react.js", "react js"]),
    ("Angular", Framework, &["angularjs", "angular.js", "angular js"]),
    ("Vue.js", Framework, &["vue", "vuejs", "vue js"]),
    ("Node.js", Framework, &["nodejs", "node js"]),
    ("Express", Framework, &["express.js", "expressjs"]),
    ("Django", Framework, &["django rest framework", "drf"]),
    ("Flask", Framework, &[]),
    ("FastAPI", Framework, &["fast api"]),
    ("Spring", Framework, &["spring boot", "springboot", "spring framework"]),
    (".NET", Framework, &["dotnet", "dot net", ".net core"]),
    ("ASP.NET", Framework, &["asp.net core", "aspnet"]),
    ("TensorFlow", Framework, &["tensor flow", "tf2"]),
    ("PyTorch", Framework, &["torch"]),
    ("scikit-learn", Framework, &["sklearn", "scikit learn"]),
    ("Pandas", Framework, &[]),
    ("NumPy", Framework, &[]),
    ("Matplotlib", Framework, &[]),
    ("Seaborn", Framework, &[]),
    ("Bootstrap", Framework, &["bootstrap 5", "bootstrap 4"]),
    ("Tailwind CSS", Framework, &["tailwind", "tailwindcss"]),
    ("Sass", Framework, &["scss"]),
    ("GraphQL", Framework, &["graph ql"]),
    ("REST APIs", Framework, &["rest api", "restful", "restful api", "restful apis"]),
    ("SOAP", Framework, &[]),
    // Tools and practice areas
    ("Git", Tool, &[]),
    ("Jenkins", Tool, &[]),
    ("CI/CD", Tool, &["continuous integration", "continuous delivery", "cicd"]),
    ("Docker", Tool, &["dockerfile"]),
    ("Kubernetes", Tool, &["k8s", "kube"]),
    ("Jira", Tool, &[]),
    ("Linux", Tool, &[]),
    ("Unix", Tool, &[]),
    ("PostgreSQL", Tool, &["postgres", "postgre sql"]),
    ("MySQL", Tool, &["my sql", "mariadb"]),
    ("MongoDB", Tool, &["mongo", "mongo db"]),
    ("Redis", Tool, &[]),
    ("Elasticsearch", Tool, &["elastic search"]),
    ("Microservices", Tool, &["microservice", "micro services"]),
    ("DevOps", Tool, &["dev ops"]),
    ("Machine Learning", Tool, &["ml", "machine learning engineering"]),
    ("Artificial Intelligence", Tool, &["ai"]),
    ("Deep Learning", Tool, &["dl", "neural networks"]),
    ("Data Science", Tool, &[]),
    ("Data Analysis", Tool, &["data analytics", "data analyst"]),
    ("Statistics", Tool, &["statistical analysis"]),
    ("Unit Testing", Tool, &["unit tests"]),
    ("Integration Testing", Tool, &["integration tests"]),
    ("TDD", Tool, &["test driven development"]),
    ("BDD", Tool, &["behavior driven development", "behaviour driven development"]),
    ("Design Patterns", Tool, &[]),
    ("OOP", Tool, &["object oriented programming", "object oriented"]),
    ("Functional Programming", Tool, &[]),
    ("Clean Code", Tool, &[]),
    ("XML", Tool, &[]),
    ("JSON", Tool, &[]),
    // Platforms
    ("AWS", Platform, &["amazon web services", "aws cloud"]),
    ("Azure", Platform, &["microsoft azure", "ms azure"]),
    ("GCP", Platform, &["google cloud platform", "google cloud"]),
    ("GitHub", Platform, &["git hub"]),
    ("GitLab", Platform, &["git lab"]),
    ("Firebase", Platform, &[]),
    ("Heroku", Platform, &[]),
    // Soft skills and methodologies
    ("Agile", SoftSkill, &["agile methodology", "agile methodologies"]),
    ("Scrum", SoftSkill, &["scrum master"]),
    ("Communication", SoftSkill, &["communication skills"]),
    ("Leadership", SoftSkill, &["team leadership", "people management"]),
    ("Teamwork", SoftSkill, &["team player", "collaboration"]),
    ("Problem Solving", SoftSkill, &["problem solver", "analytical thinking"]),
    ("Project Management", SoftSkill, &[]),
];

/// Materializes the built-in table into owned terms.
pub fn builtin_terms() -> Vec<SkillTerm> {
    BUILTIN_TERMS
        .iter()
        .map(|(canonical, category, aliases)| SkillTerm {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            category: *category,
        })
        .collect()
}
